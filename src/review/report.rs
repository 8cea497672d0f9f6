//! Review reports for export
//!
//! A plain-data snapshot of one generation's annotations and decisions,
//! consumed by the reporting side of the client.

use crate::models::{AnnotationId, AnnotationKind, ReviewState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One annotation as it appears in a report
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    pub id: AnnotationId,
    pub kind: AnnotationKind,
    pub state: ReviewState,
    pub start_index: usize,
    pub end_index: usize,
    /// Text currently in the base text
    pub original: String,
    pub replacement: String,
    pub explanation: String,
}

/// Summary of a review generation
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub generation: u32,
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub by_kind: BTreeMap<AnnotationKind, usize>,
    pub items: Vec<ReportItem>,
}

impl ReviewReport {
    pub fn new(generation: u32) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    /// Add an item, updating the counters
    pub fn add(&mut self, item: ReportItem) {
        self.total += 1;
        match item.state {
            ReviewState::Pending => self.pending += 1,
            ReviewState::Accepted => self.accepted += 1,
            ReviewState::Rejected => self.rejected += 1,
        }
        *self.by_kind.entry(item.kind).or_insert(0) += 1;
        self.items.push(item);
    }

    /// Every annotation has been accepted or rejected
    pub fn is_settled(&self) -> bool {
        self.pending == 0
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
