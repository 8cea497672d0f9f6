//! WASM API
//!
//! JavaScript-facing handles over the annotation engine.

pub mod helpers;
pub mod highlight;
pub mod review;
pub mod types;

pub use highlight::HighlightView;
pub use review::ReviewSession;
pub use types::{AnnotationInput, CommitView, SegmentView};
