//! Engine configuration
//!
//! Every field has a default, so callers pass only what they want to change:
//!
//! ```json
//! { "offsetUnit": "utf16", "minConfidence": 0.5, "historyLimit": 50 }
//! ```

use crate::text::OffsetUnit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Unit of every annotation offset passed in and reported back
    pub offset_unit: OffsetUnit,
    /// Highlight-only annotations below this confidence render as plain text
    pub min_confidence: f32,
    /// Maximum number of review decisions kept for undo (0 disables undo)
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            offset_unit: OffsetUnit::Char,
            min_confidence: 0.0,
            history_limit: 100,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Clamp values into their valid ranges
    pub fn normalized(mut self) -> Self {
        self.min_confidence = clamp_confidence(self.min_confidence);
        self
    }

    pub fn with_offset_unit(mut self, unit: OffsetUnit) -> Self {
        self.offset_unit = unit;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self.normalized()
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }
}

/// Confidence threshold in `0.0..=1.0`; NaN counts as no threshold
pub fn clamp_confidence(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
