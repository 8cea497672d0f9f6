//! Half-open ranges over a base text
//!
//! Pure positions with no knowledge of annotations.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A range of text from start (inclusive) to end (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Check if this range is empty (start >= end)
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of positions covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if a position is contained within this range
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Check if two ranges share at least one position
    ///
    /// Ranges that only touch (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_contains() {
        let range = TextRange::new(4, 7);
        assert_eq!(range.len(), 3);
        assert!(range.contains(4));
        assert!(range.contains(6));
        assert!(!range.contains(7));
        assert!(!range.is_empty());
        assert!(TextRange::new(3, 3).is_empty());
    }

    #[test]
    fn test_adjacent_ranges_do_not_overlap() {
        let first = TextRange::new(0, 3);
        let second = TextRange::new(3, 5);
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_nested_ranges_overlap() {
        let outer = TextRange::new(0, 10);
        let inner = TextRange::from(2..4);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
