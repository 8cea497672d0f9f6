//! Error types for annotation sets
//!
//! Every variant is a local usage error: a malformed classification result or
//! a UI binding that referenced a stale id. All are recoverable by discarding
//! the result or fixing the binding.

use super::AnnotationId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// Offsets outside the text, reversed/empty, or not on a character boundary
    #[error("Annotation '{id}' has invalid range {start}..{end} (text length {len})")]
    Range {
        id: AnnotationId,
        start: usize,
        end: usize,
        len: usize,
    },

    /// Offset that is not a whole number in `0..`, as sent by a JS caller
    #[error("Annotation '{id}' has invalid offset {offset}")]
    InvalidOffset { id: AnnotationId, offset: String },

    /// Two annotations share at least one character
    #[error("Annotation '{second}' starting at {second_start} overlaps annotation '{first}' ending at {first_end}")]
    Overlap {
        first: AnnotationId,
        first_end: usize,
        second: AnnotationId,
        second_start: usize,
    },

    /// Id not present in the current generation
    #[error("Unknown annotation id '{0}'")]
    UnknownId(AnnotationId),

    #[error("Duplicate annotation id '{0}'")]
    DuplicateId(AnnotationId),

    /// Edit requested on a highlight-only annotation
    #[error("Annotation '{0}' is highlight-only and cannot be edited")]
    NotEditable(AnnotationId),
}

impl AnnotationError {
    /// Stable identifier for the error class, surfaced to JavaScript
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotationError::Range { .. } | AnnotationError::InvalidOffset { .. } => "range",
            AnnotationError::Overlap { .. } => "overlap",
            AnnotationError::UnknownId(_) => "unknown_id",
            AnnotationError::DuplicateId(_) => "duplicate_id",
            AnnotationError::NotEditable(_) => "not_editable",
        }
    }
}
