//! Segmentation of a base text into plain and annotated runs

use super::Entry;
use crate::models::Annotation;
use std::iter::FusedIterator;

/// One run of the base text
///
/// `start`/`end` are in the set's offset unit, so a UI can key rendered
/// spans on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    /// The annotation covering exactly this run, `None` for plain text
    pub annotation: Option<&'a Annotation>,
}

impl<'a> Segment<'a> {
    pub fn is_highlighted(&self) -> bool {
        self.annotation.is_some()
    }
}

/// Iterator over the segments of a [`SpanSet`](super::SpanSet)
///
/// Covers the whole text with no gaps or overlaps. Empty plain runs (between
/// adjacent annotations, or at either end) are skipped.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    entries: &'a [Entry],
    /// Text length in the set's unit
    text_len: usize,
    next_entry: usize,
    byte_cursor: usize,
    unit_cursor: usize,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(text: &'a str, entries: &'a [Entry], text_len: usize) -> Self {
        Self {
            text,
            entries,
            text_len,
            next_entry: 0,
            byte_cursor: 0,
            unit_cursor: 0,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.entries.get(self.next_entry) {
            // Plain run up to the next annotation
            Some(entry) if entry.bytes.start > self.byte_cursor => {
                let segment = Segment {
                    text: &self.text[self.byte_cursor..entry.bytes.start],
                    start: self.unit_cursor,
                    end: entry.annotation.start_index,
                    annotation: None,
                };
                self.byte_cursor = entry.bytes.start;
                self.unit_cursor = entry.annotation.start_index;
                Some(segment)
            }
            Some(entry) => {
                let segment = Segment {
                    text: &self.text[entry.bytes.as_range()],
                    start: entry.annotation.start_index,
                    end: entry.annotation.end_index,
                    annotation: Some(&entry.annotation),
                };
                self.byte_cursor = entry.bytes.end;
                self.unit_cursor = entry.annotation.end_index;
                self.next_entry += 1;
                Some(segment)
            }
            // Trailing plain run
            None if self.byte_cursor < self.text.len() => {
                let segment = Segment {
                    text: &self.text[self.byte_cursor..],
                    start: self.unit_cursor,
                    end: self.text_len,
                    annotation: None,
                };
                self.byte_cursor = self.text.len();
                self.unit_cursor = self.text_len;
                Some(segment)
            }
            None => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let annotated = self.entries.len() - self.next_entry;
        let tail = usize::from(self.byte_cursor < self.text.len());
        (annotated.max(tail), Some(annotated * 2 + tail))
    }
}

impl FusedIterator for Segments<'_> {}
