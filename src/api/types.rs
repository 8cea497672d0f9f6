//! Shared types for the WASM API
//!
//! Owned, serializable views of engine results handed to JavaScript.

use crate::models::{Annotation, AnnotationError, AnnotationId, AnnotationKind, Payload, ReviewState};
use crate::review::{CommitOutcome, ReviewSegment};
use crate::spans::Segment;
use serde::{Deserialize, Serialize};

/// Annotation as sent by a JS classifier
///
/// Offsets arrive as plain JS numbers, so `-1` from `indexOf` or a
/// fractional value is caught here and reported as a range error.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationInput {
    #[serde(default = "AnnotationId::generate")]
    pub id: AnnotationId,
    pub start_index: f64,
    pub end_index: f64,
    pub kind: AnnotationKind,
    pub payload: Payload,
}

impl AnnotationInput {
    pub fn into_annotation(self) -> Result<Annotation, AnnotationError> {
        let start_index = offset(&self.id, self.start_index)?;
        let end_index = offset(&self.id, self.end_index)?;
        Ok(Annotation {
            id: self.id,
            start_index,
            end_index,
            kind: self.kind,
            payload: self.payload,
        })
    }
}

fn offset(id: &AnnotationId, value: f64) -> Result<usize, AnnotationError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(AnnotationError::InvalidOffset {
            id: id.clone(),
            offset: value.to_string(),
        })
    }
}

/// One rendered run of text
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentView {
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
    /// Review state (grammar view only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ReviewState>,
}

impl From<Segment<'_>> for SegmentView {
    fn from(segment: Segment<'_>) -> Self {
        Self {
            text: segment.text.to_string(),
            start: segment.start,
            end: segment.end,
            annotation: segment.annotation.cloned(),
            state: None,
        }
    }
}

impl From<ReviewSegment<'_>> for SegmentView {
    fn from(review: ReviewSegment<'_>) -> Self {
        Self {
            state: review.state,
            ..SegmentView::from(review.segment)
        }
    }
}

/// Result of a commit (returned to JavaScript)
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommitView {
    pub new_text: String,
    pub applied_count: usize,
    /// Generation after the commit
    pub generation: u32,
    /// Nothing was applied; the UI shows a notice rather than an error
    pub no_op: bool,
}

impl CommitView {
    pub fn new(outcome: CommitOutcome, generation: u32) -> Self {
        Self {
            no_op: outcome.is_noop(),
            new_text: outcome.new_text,
            applied_count: outcome.applied_count,
            generation,
        }
    }
}
