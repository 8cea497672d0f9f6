//! Validated annotation sets over one base text
//!
//! A [`SpanSet`] owns a base text and a sorted, non-overlapping list of
//! annotations anchored to it. It is immutable once created: review state
//! lives in the controller layered on top, and edits produce a new string
//! rather than touching the base text.
//!
//! ## Edit ordering
//!
//! Replacements are applied from the highest start offset down:
//!
//! ```text
//! "Teh cat sat."     {0,3} Teh→The   {4,7} cat→kitten
//!
//! 1. {4,7}  "Teh kitten sat."   offsets before 4 untouched
//! 2. {0,3}  "The kitten sat."   {0,3} still points at "Teh"
//! ```
//!
//! Applying `{0,3}` first would be harmless here (same length), but any
//! length change shifts every later offset.

pub mod segments;

pub use segments::{Segment, Segments};

use crate::models::{Annotation, AnnotationError, AnnotationId};
use crate::text::{OffsetIndex, OffsetUnit, TextRange};
use std::collections::HashMap;

/// An annotation plus its resolved byte range in the base text
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) annotation: Annotation,
    pub(crate) bytes: TextRange,
}

/// Annotations selected for application, highest start offset first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EditPlan {
    indices: Vec<usize>,
}

impl EditPlan {
    /// Build a plan from entry indices (entries are sorted by start offset)
    pub(crate) fn from_indices(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        Self { indices }
    }

    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Sorted, non-overlapping annotations over one immutable base text
#[derive(Debug, Clone)]
pub struct SpanSet {
    text: String,
    unit: OffsetUnit,
    /// Text length in `unit`
    text_len: usize,
    entries: Vec<Entry>,
    by_id: HashMap<AnnotationId, usize>,
}

impl SpanSet {
    /// Validate annotations against `base_text` and build the set
    ///
    /// Fails with `Range` for offsets outside the text, reversed or empty
    /// ranges, and offsets that split a character; `Overlap` when two
    /// annotations share a character; `DuplicateId` when ids collide.
    pub fn create(
        base_text: impl Into<String>,
        annotations: Vec<Annotation>,
        unit: OffsetUnit,
    ) -> Result<Self, AnnotationError> {
        let text = base_text.into();
        let offsets = OffsetIndex::new(&text, unit);

        let mut entries = annotations
            .into_iter()
            .map(|annotation| {
                let bytes = resolve(&offsets, &annotation)?;
                Ok(Entry { annotation, bytes })
            })
            .collect::<Result<Vec<_>, AnnotationError>>()?;

        entries.sort_by_key(|entry| (entry.annotation.start_index, entry.annotation.end_index));

        for pair in entries.windows(2) {
            let (prev, next) = (&pair[0].annotation, &pair[1].annotation);
            if prev.range().overlaps(&next.range()) {
                log::warn!(
                    "Rejecting annotation set: '{}' overlaps '{}'",
                    next.id,
                    prev.id
                );
                return Err(AnnotationError::Overlap {
                    first: prev.id.clone(),
                    first_end: prev.end_index,
                    second: next.id.clone(),
                    second_start: next.start_index,
                });
            }
        }

        let mut by_id = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.annotation.id.clone(), index).is_some() {
                return Err(AnnotationError::DuplicateId(entry.annotation.id.clone()));
            }
        }

        log::debug!(
            "SpanSet created: {} annotations over {} {} units",
            entries.len(),
            offsets.len(),
            unit.as_str()
        );

        Ok(Self {
            text,
            unit,
            text_len: offsets.len(),
            entries,
            by_id,
        })
    }

    /// A set with no annotations
    pub fn empty(base_text: impl Into<String>, unit: OffsetUnit) -> Self {
        let text = base_text.into();
        let text_len = unit.measure(&text);
        Self {
            text,
            unit,
            text_len,
            entries: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    pub fn base_text(&self) -> &str {
        &self.text
    }

    pub fn unit(&self) -> OffsetUnit {
        self.unit
    }

    /// Base text length in the set's offset unit
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Number of annotations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Annotations in ascending start order
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> + '_ {
        self.entries.iter().map(|entry| &entry.annotation)
    }

    pub fn contains(&self, id: &AnnotationId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.by_id
            .get(id)
            .map(|&index| &self.entries[index].annotation)
    }

    /// Annotation covering `offset`, if any
    pub fn annotation_at(&self, offset: usize) -> Option<&Annotation> {
        let index = self
            .entries
            .partition_point(|entry| entry.annotation.end_index <= offset);
        self.entries
            .get(index)
            .map(|entry| &entry.annotation)
            .filter(|annotation| annotation.range().contains(offset))
    }

    /// Original base text covered by an annotation
    pub fn text_of(&self, id: &AnnotationId) -> Result<&str, AnnotationError> {
        let index = self.index_of(id)?;
        Ok(&self.text[self.entries[index].bytes.as_range()])
    }

    /// Plain and annotated runs covering the whole base text, in order
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(&self.text, &self.entries, self.text_len)
    }

    /// Substitute the replacement text of each selected annotation
    ///
    /// Unselected annotations keep their original text. Returns a new
    /// string; the base text is never modified.
    pub fn apply_edits<'a, I>(&self, selected: I) -> Result<String, AnnotationError>
    where
        I: IntoIterator<Item = &'a AnnotationId>,
    {
        let plan = self.edit_plan(selected)?;
        Ok(self.apply_plan(&plan))
    }

    /// Keep only annotations matching `keep`
    ///
    /// A subset of a valid set is valid, so nothing is re-checked.
    pub fn filtered<F>(&self, mut keep: F) -> SpanSet
    where
        F: FnMut(&Annotation) -> bool,
    {
        let entries: Vec<Entry> = self
            .entries
            .iter()
            .filter(|entry| keep(&entry.annotation))
            .cloned()
            .collect();
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.annotation.id.clone(), index))
            .collect();

        SpanSet {
            text: self.text.clone(),
            unit: self.unit,
            text_len: self.text_len,
            entries,
            by_id,
        }
    }

    pub(crate) fn index_of(&self, id: &AnnotationId) -> Result<usize, AnnotationError> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| AnnotationError::UnknownId(id.clone()))
    }

    /// Resolve ids into a plan, checking each is known and editable
    pub(crate) fn edit_plan<'a, I>(&self, selected: I) -> Result<EditPlan, AnnotationError>
    where
        I: IntoIterator<Item = &'a AnnotationId>,
    {
        let mut indices = Vec::new();
        for id in selected {
            let index = self.index_of(id)?;
            if !self.entries[index].annotation.is_editable() {
                return Err(AnnotationError::NotEditable(id.clone()));
            }
            indices.push(index);
        }
        Ok(EditPlan::from_indices(indices))
    }

    pub(crate) fn apply_plan(&self, plan: &EditPlan) -> String {
        let mut text = self.text.clone();
        for &index in &plan.indices {
            let entry = &self.entries[index];
            if let Some(replacement) = entry.annotation.payload.replacement_text() {
                text.replace_range(entry.bytes.as_range(), replacement);
            }
        }

        log::debug!(
            "Applied {} edits ({} -> {} bytes)",
            plan.len(),
            self.text.len(),
            text.len()
        );
        text
    }
}

fn resolve(offsets: &OffsetIndex, annotation: &Annotation) -> Result<TextRange, AnnotationError> {
    let range_error = || AnnotationError::Range {
        id: annotation.id.clone(),
        start: annotation.start_index,
        end: annotation.end_index,
        len: offsets.len(),
    };

    if annotation.start_index >= annotation.end_index {
        return Err(range_error());
    }

    let start = offsets.to_byte(annotation.start_index).ok_or_else(range_error)?;
    let end = offsets.to_byte(annotation.end_index).ok_or_else(range_error)?;
    Ok(TextRange::new(start, end))
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod proptests {
    use super::*;
    use crate::models::AnnotationKind;
    use proptest::prelude::*;

    /// Turn arbitrary cut points into sorted, non-overlapping char ranges
    fn ranges_from_cuts(len: usize, cuts: &[usize]) -> Vec<(usize, usize)> {
        let mut points: Vec<usize> = cuts.iter().map(|c| c % (len + 1)).collect();
        points.sort_unstable();
        points.dedup();
        points
            .chunks(2)
            .filter_map(|pair| match pair {
                [start, end] => Some((*start, *end)),
                _ => None,
            })
            .collect()
    }

    proptest! {
        /// Segments concatenated back together reproduce the base text.
        #[test]
        fn segments_roundtrip(text in "\\PC{0,40}", cuts in proptest::collection::vec(0usize..64, 0..12)) {
            let len = text.chars().count();
            let annotations: Vec<Annotation> = ranges_from_cuts(len, &cuts)
                .into_iter()
                .enumerate()
                .map(|(i, (start, end))| {
                    Annotation::edit(format!("a{i}"), start, end, AnnotationKind::Style, "", "")
                })
                .collect();
            let count = annotations.len();

            let set = SpanSet::create(text.clone(), annotations, OffsetUnit::Char).unwrap();
            let rebuilt: String = set.segments().map(|segment| segment.text).collect();
            prop_assert_eq!(rebuilt, text);

            let highlighted = set.segments().filter(|s| s.annotation.is_some()).count();
            prop_assert_eq!(highlighted, count);
        }

        /// Any overlapping pair is rejected, whatever order it arrives in.
        #[test]
        fn overlapping_pair_is_rejected(len in 2usize..40, a in 0usize..40, b in 0usize..40, c in 0usize..40, swap in any::<bool>()) {
            let text = "x".repeat(len);
            let start1 = a % (len - 1);
            let end1 = start1 + 1 + b % (len - start1);
            let start2 = start1 + c % (end1 - start1);
            let end2 = start2 + 1 + a % (len - start2);

            let first = Annotation::edit("first", start1, end1, AnnotationKind::Grammar, "", "");
            let second = Annotation::edit("second", start2, end2, AnnotationKind::Grammar, "", "");
            let annotations = if swap { vec![second, first] } else { vec![first, second] };

            let result = SpanSet::create(text, annotations, OffsetUnit::Char);
            let is_overlap = matches!(result, Err(AnnotationError::Overlap { .. }));
            prop_assert!(is_overlap, "expected Overlap error, got {:?}", result);
        }

        /// Applying every edit equals splicing replacements left to right by hand.
        #[test]
        fn apply_all_matches_manual_splice(text in "[a-z ]{1,40}", cuts in proptest::collection::vec(0usize..64, 0..12), grow in 0usize..4) {
            let len = text.len();
            let ranges = ranges_from_cuts(len, &cuts);
            let annotations: Vec<Annotation> = ranges
                .iter()
                .enumerate()
                .map(|(i, &(start, end))| {
                    Annotation::edit(format!("a{i}"), start, end, AnnotationKind::Grammar, "#".repeat(grow), "")
                })
                .collect();
            let all: Vec<AnnotationId> = annotations.iter().map(|a| a.id.clone()).collect();

            let mut expected = String::new();
            let mut cursor = 0;
            for &(start, end) in &ranges {
                expected.push_str(&text[cursor..start]);
                expected.push_str(&"#".repeat(grow));
                cursor = end;
            }
            expected.push_str(&text[cursor..]);

            let set = SpanSet::create(text, annotations, OffsetUnit::Char).unwrap();
            prop_assert_eq!(set.apply_edits(&all).unwrap(), expected);
        }
    }
}
