//! Proofreading WASM Module
//!
//! Span-based annotation engine for the writing assistant: grammar review
//! with accept/reject and commit, plus read-only highlighting for
//! AI-detection and plagiarism results.

pub mod api;
pub mod config;
pub mod highlight;
pub mod models;
pub mod review;
pub mod spans;
pub mod text;

// Re-export commonly used types
pub use config::{ConfigError, EngineConfig};
pub use highlight::{HighlightProjector, HighlightSummary};
pub use models::{Annotation, AnnotationError, AnnotationId, AnnotationKind, Payload, ReviewState};
pub use review::{AnnotationController, CommitOutcome, ReviewReport, ReviewSegment, ReviewSegments};
pub use spans::{Segment, Segments, SpanSet};
pub use text::{OffsetUnit, TextRange};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        wasm_warn!("logger already initialized");
    }

    log::info!("Proofreading WASM module initialized");
}
