//! Read-only highlighting for AI-detection and plagiarism views
//!
//! These views only tag ranges; there is nothing to accept, reject or
//! commit. [`HighlightProjector`] is a [`SpanSet`] with a confidence
//! threshold and a coverage summary, and deliberately exposes no mutation.

use crate::config::{clamp_confidence, EngineConfig};
use crate::models::{Annotation, AnnotationError, AnnotationKind};
use crate::spans::{Segments, SpanSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coverage figures for a highlighted text
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSummary {
    /// Text length in the configured offset unit
    pub total_length: usize,
    /// Length covered by visible highlights
    pub flagged_length: usize,
    /// `flagged_length / total_length`, 0 for empty text
    pub coverage: f64,
    /// Mean confidence of visible flags, `None` when no flag carries one
    pub mean_confidence: Option<f32>,
    pub visible: usize,
    /// Annotations below the confidence threshold
    pub hidden: usize,
    pub by_kind: BTreeMap<AnnotationKind, usize>,
}

#[derive(Debug, Clone)]
pub struct HighlightProjector {
    all: SpanSet,
    visible: SpanSet,
    min_confidence: f32,
}

impl HighlightProjector {
    /// Project `spans`, hiding flags below `min_confidence`
    ///
    /// The threshold is clamped into `0.0..=1.0`; NaN shows every flag.
    pub fn new(spans: SpanSet, min_confidence: f32) -> Self {
        let min_confidence = clamp_confidence(min_confidence);
        let visible = spans.filtered(|annotation| {
            annotation
                .payload
                .confidence()
                .map_or(true, |confidence| confidence >= min_confidence)
        });

        log::debug!(
            "HighlightProjector: {} of {} annotations at or above {:.2}",
            visible.len(),
            spans.len(),
            min_confidence
        );

        Self {
            all: spans,
            visible,
            min_confidence,
        }
    }

    /// Validate a detection result and project it
    pub fn from_config(
        base_text: impl Into<String>,
        annotations: Vec<Annotation>,
        config: &EngineConfig,
    ) -> Result<Self, AnnotationError> {
        let spans = SpanSet::create(base_text, annotations, config.offset_unit)?;
        Ok(Self::new(spans, config.min_confidence))
    }

    pub fn base_text(&self) -> &str {
        self.all.base_text()
    }

    /// Every annotation, including those under the threshold
    pub fn spans(&self) -> &SpanSet {
        &self.all
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Segments with only the visible annotations highlighted
    pub fn segments(&self) -> Segments<'_> {
        self.visible.segments()
    }

    pub fn summary(&self) -> HighlightSummary {
        let mut by_kind = BTreeMap::new();
        let mut flagged_length = 0;
        let mut confidence_sum = 0.0f32;
        let mut confidence_count = 0usize;

        for annotation in self.visible.iter() {
            flagged_length += annotation.range().len();
            *by_kind.entry(annotation.kind).or_insert(0) += 1;
            if let Some(confidence) = annotation.payload.confidence() {
                confidence_sum += confidence;
                confidence_count += 1;
            }
        }

        let total_length = self.all.text_len();
        let coverage = if total_length == 0 {
            0.0
        } else {
            flagged_length as f64 / total_length as f64
        };

        HighlightSummary {
            total_length,
            flagged_length,
            coverage,
            mean_confidence: (confidence_count > 0)
                .then(|| confidence_sum / confidence_count as f32),
            visible: self.visible.len(),
            hidden: self.all.len() - self.visible.len(),
            by_kind,
        }
    }
}
