//! Annotation types
//!
//! An annotation flags one range of a base text. Editable annotations
//! (grammar, spelling, ...) carry a replacement; highlight-only annotations
//! (AI detection, plagiarism) carry a confidence score instead.
//!
//! Wire shape, as sent by the classifier client:
//!
//! ```json
//! { "id": "a1", "startIndex": 0, "endIndex": 3, "kind": "spelling",
//!   "payload": { "replacementText": "The", "explanation": "Misspelling" } }
//! ```

use crate::text::TextRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque annotation identifier, stable across re-renders
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(String);

impl AnnotationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id for annotations the classifier sent without one
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AnnotationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Category of a flagged range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    Grammar,
    Spelling,
    Punctuation,
    Style,
    AiContent,
    Plagiarism,
}

impl AnnotationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationKind::Grammar => "grammar",
            AnnotationKind::Spelling => "spelling",
            AnnotationKind::Punctuation => "punctuation",
            AnnotationKind::Style => "style",
            AnnotationKind::AiContent => "ai_content",
            AnnotationKind::Plagiarism => "plagiarism",
        }
    }
}

/// Data carried by an annotation for display and commit
///
/// The classifier does not tag payloads, so the variant is picked by shape:
/// anything with a `replacementText` is an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    #[serde(rename_all = "camelCase")]
    Edit {
        replacement_text: String,
        #[serde(default)]
        explanation: String,
    },
    Flag {
        confidence: f32,
        #[serde(default)]
        reason: String,
    },
}

impl Payload {
    pub fn is_edit(&self) -> bool {
        matches!(self, Payload::Edit { .. })
    }

    pub fn replacement_text(&self) -> Option<&str> {
        match self {
            Payload::Edit { replacement_text, .. } => Some(replacement_text),
            Payload::Flag { .. } => None,
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match self {
            Payload::Edit { explanation, .. } => Some(explanation),
            Payload::Flag { .. } => None,
        }
    }

    pub fn confidence(&self) -> Option<f32> {
        match self {
            Payload::Flag { confidence, .. } => Some(*confidence),
            Payload::Edit { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Payload::Flag { reason, .. } => Some(reason),
            Payload::Edit { .. } => None,
        }
    }
}

/// One flagged range of a base text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(default = "AnnotationId::generate")]
    pub id: AnnotationId,
    /// Start offset (inclusive), in the set's offset unit
    pub start_index: usize,
    /// End offset (exclusive), in the set's offset unit
    pub end_index: usize,
    pub kind: AnnotationKind,
    pub payload: Payload,
}

impl Annotation {
    /// Create an editable annotation
    pub fn edit(
        id: impl Into<AnnotationId>,
        start_index: usize,
        end_index: usize,
        kind: AnnotationKind,
        replacement_text: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_index,
            end_index,
            kind,
            payload: Payload::Edit {
                replacement_text: replacement_text.into(),
                explanation: explanation.into(),
            },
        }
    }

    /// Create a highlight-only annotation
    pub fn flag(
        id: impl Into<AnnotationId>,
        start_index: usize,
        end_index: usize,
        kind: AnnotationKind,
        confidence: f32,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_index,
            end_index,
            kind,
            payload: Payload::Flag {
                confidence,
                reason: reason.into(),
            },
        }
    }

    /// Offsets as a range, in the set's offset unit
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start_index, self.end_index)
    }

    pub fn is_editable(&self) -> bool {
        self.payload.is_edit()
    }
}

/// Review decision for an editable annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ReviewState {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewState::Pending => "pending",
            ReviewState::Accepted => "accepted",
            ReviewState::Rejected => "rejected",
        }
    }
}
