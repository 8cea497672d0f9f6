//! Layer 0: Base text coordinates
//!
//! Everything the engine knows about positions in a base text lives here.
//! Annotations arrive with offsets in a caller-chosen unit; this layer turns
//! them into byte ranges that can slice a Rust `str` safely.
//!
//! ## Modules
//!
//! - `offsets`: Unit offsets (chars or UTF-16 code units) to byte positions
//! - `range`: Half-open ranges over a text

pub mod offsets;
pub mod range;

// Re-exports for convenience
pub use offsets::{OffsetIndex, OffsetUnit};
pub use range::TextRange;
