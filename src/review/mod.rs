//! Interactive review of editable annotations
//!
//! [`AnnotationController`] layers a pending/accepted/rejected state over a
//! [`SpanSet`] and mediates the render/commit cycle of the grammar checker:
//!
//! ```text
//! classifier ─► SpanSet::create ─► AnnotationController
//!                                     │  segments()      (every render)
//!                                     │  toggle_*/bulk   (user input)
//!                                     ▼
//!                                  commit() ─► new text ─► classifier again
//! ```
//!
//! ## Generations
//!
//! A controller holds one generation: a base text and the annotations
//! classified against it. Every successful commit ends the generation, even
//! one that applies nothing: the annotations are discarded wholesale and the
//! controller continues with the resulting text and an empty set. Stale ids
//! from then on fail with `UnknownId`. `reset` starts a generation from a
//! fresh classification result.

pub mod history;
pub mod report;

pub use history::{Decision, ReviewHistory, StateChange};
pub use report::{ReportItem, ReviewReport};

use crate::config::EngineConfig;
use crate::models::{Annotation, AnnotationError, AnnotationId, ReviewState};
use crate::spans::{EditPlan, Segment, Segments, SpanSet};
use serde::{Deserialize, Serialize};

/// Result of a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitOutcome {
    pub new_text: String,
    /// Number of edits applied; zero means there was nothing to apply
    pub applied_count: usize,
}

impl CommitOutcome {
    pub fn is_noop(&self) -> bool {
        self.applied_count == 0
    }
}

/// A segment plus the review state of its annotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewSegment<'a> {
    pub segment: Segment<'a>,
    /// `None` for plain runs
    pub state: Option<ReviewState>,
}

/// Iterator over segments with their review state
#[derive(Debug, Clone)]
pub struct ReviewSegments<'a> {
    segments: Segments<'a>,
    states: &'a [ReviewState],
    next_state: usize,
}

impl<'a> Iterator for ReviewSegments<'a> {
    type Item = ReviewSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.segments.next()?;
        // Annotated segments come out in set order, matching `states`
        let state = segment.annotation.map(|_| {
            let state = self.states[self.next_state];
            self.next_state += 1;
            state
        });
        Some(ReviewSegment { segment, state })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.segments.size_hint()
    }
}

/// Accept/reject state machine over one generation of editable annotations
#[derive(Debug, Clone)]
pub struct AnnotationController {
    spans: SpanSet,
    /// Parallel to the set's annotations, in ascending start order
    states: Vec<ReviewState>,
    history: ReviewHistory,
    generation: u32,
}

impl AnnotationController {
    /// Wrap a validated set; every annotation must be editable
    pub fn new(spans: SpanSet, history_limit: usize) -> Result<Self, AnnotationError> {
        ensure_editable(&spans)?;
        Ok(Self {
            states: vec![ReviewState::Pending; spans.len()],
            spans,
            history: ReviewHistory::new(history_limit),
            generation: 0,
        })
    }

    /// Validate a classification result and wrap it
    pub fn from_config(
        base_text: impl Into<String>,
        annotations: Vec<Annotation>,
        config: &EngineConfig,
    ) -> Result<Self, AnnotationError> {
        let spans = SpanSet::create(base_text, annotations, config.offset_unit)?;
        Self::new(spans, config.history_limit)
    }

    pub fn base_text(&self) -> &str {
        self.spans.base_text()
    }

    pub fn spans(&self) -> &SpanSet {
        &self.spans
    }

    /// Incremented by every successful commit and every reset
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, id: &AnnotationId) -> Result<ReviewState, AnnotationError> {
        let index = self.spans.index_of(id)?;
        Ok(self.states[index])
    }

    /// Annotations with their current state, in ascending start order
    pub fn states(&self) -> impl Iterator<Item = (&Annotation, ReviewState)> + '_ {
        self.spans.iter().zip(self.states.iter().copied())
    }

    /// Ids currently accepted, in ascending start order
    pub fn accepted_ids(&self) -> Vec<AnnotationId> {
        self.states()
            .filter(|(_, state)| *state == ReviewState::Accepted)
            .map(|(annotation, _)| annotation.id.clone())
            .collect()
    }

    /// Mark an annotation accepted; accepting twice keeps it accepted
    pub fn toggle_accept(&mut self, id: &AnnotationId) -> Result<ReviewState, AnnotationError> {
        self.decide(id, ReviewState::Accepted)
    }

    /// Mark an annotation rejected; rejecting twice keeps it rejected
    pub fn toggle_reject(&mut self, id: &AnnotationId) -> Result<ReviewState, AnnotationError> {
        self.decide(id, ReviewState::Rejected)
    }

    /// Accept every annotation; returns how many changed
    pub fn accept_all(&mut self) -> usize {
        self.set_all(ReviewState::Accepted)
    }

    /// Reject every annotation; returns how many changed
    pub fn reject_all(&mut self) -> usize {
        self.set_all(ReviewState::Rejected)
    }

    /// Return every annotation to pending; returns how many changed
    pub fn clear_decisions(&mut self) -> usize {
        self.set_all(ReviewState::Pending)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(decision) => {
                decision.revert(&mut self.states);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(decision) => {
                decision.apply(&mut self.states);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Segments of the base text with each annotation's current state
    pub fn segments(&self) -> ReviewSegments<'_> {
        ReviewSegments {
            segments: self.spans.segments(),
            states: &self.states,
            next_state: 0,
        }
    }

    /// Apply edits and move to the next generation
    ///
    /// With no selection every accepted annotation is applied. With a
    /// selection exactly those ids are applied, whatever their state. A
    /// commit that applies nothing still discards the annotations; an
    /// invalid selection fails before anything changes.
    pub fn commit(
        &mut self,
        selection: Option<&[AnnotationId]>,
    ) -> Result<CommitOutcome, AnnotationError> {
        let plan = match selection {
            Some(ids) => self.spans.edit_plan(ids)?,
            None => EditPlan::from_indices(
                self.states
                    .iter()
                    .enumerate()
                    .filter(|(_, state)| **state == ReviewState::Accepted)
                    .map(|(index, _)| index)
                    .collect(),
            ),
        };

        let new_text = self.spans.apply_plan(&plan);
        let applied_count = plan.len();
        if plan.is_empty() {
            log::info!("Commit: nothing to apply (generation {})", self.generation);
        } else {
            log::info!(
                "Commit: applied {} of {} edits (generation {})",
                applied_count,
                self.spans.len(),
                self.generation
            );
        }

        let unit = self.spans.unit();
        self.start_generation(SpanSet::empty(new_text.clone(), unit));

        Ok(CommitOutcome {
            new_text,
            applied_count,
        })
    }

    /// Replace the generation with a fresh classification result
    ///
    /// On error the current generation is kept.
    pub fn reset(
        &mut self,
        base_text: impl Into<String>,
        annotations: Vec<Annotation>,
    ) -> Result<(), AnnotationError> {
        let spans = SpanSet::create(base_text, annotations, self.spans.unit())?;
        ensure_editable(&spans)?;
        self.start_generation(spans);
        Ok(())
    }

    /// Snapshot of the generation for export
    pub fn report(&self) -> ReviewReport {
        let mut report = ReviewReport::new(self.generation);
        for segment in self.segments() {
            let (Some(annotation), Some(state)) = (segment.segment.annotation, segment.state) else {
                continue;
            };
            report.add(ReportItem {
                id: annotation.id.clone(),
                kind: annotation.kind,
                state,
                start_index: annotation.start_index,
                end_index: annotation.end_index,
                original: segment.segment.text.to_string(),
                replacement: annotation.payload.replacement_text().unwrap_or_default().to_string(),
                explanation: annotation.payload.explanation().unwrap_or_default().to_string(),
            });
        }
        report
    }

    fn decide(
        &mut self,
        id: &AnnotationId,
        target: ReviewState,
    ) -> Result<ReviewState, AnnotationError> {
        let index = self.spans.index_of(id)?;
        let before = self.states[index];
        if before != target {
            self.states[index] = target;
            self.history.record(Decision::Single(StateChange {
                index,
                before,
                after: target,
            }));
        }
        Ok(target)
    }

    fn set_all(&mut self, target: ReviewState) -> usize {
        let changes: Vec<StateChange> = self
            .states
            .iter()
            .enumerate()
            .filter(|(_, state)| **state != target)
            .map(|(index, &before)| StateChange {
                index,
                before,
                after: target,
            })
            .collect();

        if changes.is_empty() {
            return 0;
        }

        let decision = Decision::Batch(changes);
        decision.apply(&mut self.states);
        let changed = decision.changes().len();
        self.history.record(decision);
        changed
    }

    fn start_generation(&mut self, spans: SpanSet) {
        self.states = vec![ReviewState::Pending; spans.len()];
        self.spans = spans;
        self.history.clear();
        self.generation += 1;
    }
}

fn ensure_editable(spans: &SpanSet) -> Result<(), AnnotationError> {
    match spans.iter().find(|annotation| !annotation.is_editable()) {
        Some(annotation) => Err(AnnotationError::NotEditable(annotation.id.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnnotationKind;
    use crate::text::OffsetUnit;

    fn controller(text: &str, annotations: Vec<Annotation>) -> AnnotationController {
        AnnotationController::from_config(text, annotations, &EngineConfig::default()).unwrap()
    }

    fn teh_cat() -> AnnotationController {
        controller(
            "Teh cat sat.",
            vec![
                Annotation::edit("a", 0, 3, AnnotationKind::Spelling, "The", "Misspelling"),
                Annotation::edit("b", 4, 7, AnnotationKind::Style, "kitten", "Friendlier"),
            ],
        )
    }

    #[test]
    fn test_initial_state_is_pending() {
        let controller = teh_cat();
        assert_eq!(controller.state(&"a".into()).unwrap(), ReviewState::Pending);
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.len(), 2);
    }

    #[test]
    fn test_toggle_transitions() {
        let mut controller = teh_cat();
        let id: AnnotationId = "a".into();

        assert_eq!(controller.toggle_accept(&id).unwrap(), ReviewState::Accepted);
        assert_eq!(controller.toggle_accept(&id).unwrap(), ReviewState::Accepted);
        assert_eq!(controller.toggle_reject(&id).unwrap(), ReviewState::Rejected);
        assert_eq!(controller.toggle_reject(&id).unwrap(), ReviewState::Rejected);
        assert_eq!(controller.toggle_accept(&id).unwrap(), ReviewState::Accepted);
        assert_eq!(controller.state(&id).unwrap(), ReviewState::Accepted);
    }

    #[test]
    fn test_unknown_id_leaves_state_untouched() {
        let mut controller = teh_cat();
        controller.toggle_accept(&"a".into()).unwrap();

        let err = controller.toggle_reject(&"missing".into()).unwrap_err();
        assert_eq!(err, AnnotationError::UnknownId("missing".into()));
        assert_eq!(controller.accepted_ids(), vec![AnnotationId::from("a")]);
    }

    #[test]
    fn test_rejects_highlight_only_annotations() {
        let result = AnnotationController::from_config(
            "Generated paragraph",
            vec![Annotation::flag("f", 0, 9, AnnotationKind::AiContent, 0.8, "")],
            &EngineConfig::default(),
        );
        assert_eq!(result.unwrap_err(), AnnotationError::NotEditable("f".into()));
    }

    #[test]
    fn test_bulk_operations_report_changes() {
        let mut controller = teh_cat();
        controller.toggle_accept(&"a".into()).unwrap();

        assert_eq!(controller.accept_all(), 1);
        assert_eq!(controller.accept_all(), 0);
        assert_eq!(controller.reject_all(), 2);
        assert_eq!(controller.clear_decisions(), 2);
        assert!(controller.states().all(|(_, s)| s == ReviewState::Pending));
    }

    #[test]
    fn test_segments_carry_state() {
        let mut controller = teh_cat();
        controller.toggle_reject(&"b".into()).unwrap();

        let states: Vec<Option<ReviewState>> = controller.segments().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![
                Some(ReviewState::Pending),
                None,
                Some(ReviewState::Rejected),
                None
            ]
        );
    }

    #[test]
    fn test_commit_ends_generation() {
        let mut controller = teh_cat();
        controller.toggle_accept(&"b".into()).unwrap();

        let outcome = controller.commit(None).unwrap();
        assert_eq!(outcome.new_text, "Teh kitten sat.");
        assert_eq!(outcome.applied_count, 1);
        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.base_text(), "Teh kitten sat.");
        assert!(controller.is_empty());
        assert!(!controller.can_undo());

        // Old ids do not survive into the new text
        let err = controller.toggle_accept(&"a".into()).unwrap_err();
        assert_eq!(err.kind(), "unknown_id");
    }

    #[test]
    fn test_noop_commit_discards_annotations() {
        let mut controller = teh_cat();
        let outcome = controller.commit(None).unwrap();

        assert!(outcome.is_noop());
        assert_eq!(outcome.new_text, "Teh cat sat.");
        assert_eq!(controller.base_text(), "Teh cat sat.");
        assert_eq!(controller.generation(), 1);
        assert!(controller.is_empty());

        let err = controller.toggle_accept(&"a".into()).unwrap_err();
        assert_eq!(err.kind(), "unknown_id");
    }

    #[test]
    fn test_commit_selection_ignores_state() {
        let mut controller = teh_cat();
        controller.toggle_reject(&"a".into()).unwrap();
        controller.toggle_accept(&"b".into()).unwrap();

        let selection = [AnnotationId::from("a")];
        let outcome = controller.commit(Some(&selection[..])).unwrap();
        assert_eq!(outcome.new_text, "The cat sat.");
        assert_eq!(outcome.applied_count, 1);
    }

    #[test]
    fn test_failed_commit_is_recoverable() {
        let mut controller = teh_cat();
        controller.toggle_accept(&"a".into()).unwrap();

        let selection = [AnnotationId::from("a"), AnnotationId::from("ghost")];
        assert!(controller.commit(Some(&selection[..])).is_err());
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.state(&"a".into()).unwrap(), ReviewState::Accepted);
    }

    #[test]
    fn test_undo_redo_decisions() {
        let mut controller = teh_cat();
        let a: AnnotationId = "a".into();

        controller.toggle_accept(&a).unwrap();
        controller.toggle_accept(&a).unwrap(); // unchanged, not recorded
        controller.toggle_reject(&a).unwrap();

        assert!(controller.undo());
        assert_eq!(controller.state(&a).unwrap(), ReviewState::Accepted);
        assert!(controller.undo());
        assert_eq!(controller.state(&a).unwrap(), ReviewState::Pending);
        assert!(!controller.undo());

        assert!(controller.redo());
        assert_eq!(controller.state(&a).unwrap(), ReviewState::Accepted);
    }

    #[test]
    fn test_undo_bulk_in_one_step() {
        let mut controller = teh_cat();
        controller.toggle_accept(&"a".into()).unwrap();
        controller.reject_all();

        assert!(controller.undo());
        assert_eq!(controller.state(&"a".into()).unwrap(), ReviewState::Accepted);
        assert_eq!(controller.state(&"b".into()).unwrap(), ReviewState::Pending);
    }

    #[test]
    fn test_reset_starts_new_generation() {
        let mut controller = teh_cat();
        controller.accept_all();

        controller
            .reset(
                "A new text",
                vec![Annotation::edit("n", 2, 5, AnnotationKind::Grammar, "old", "")],
            )
            .unwrap();

        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.base_text(), "A new text");
        assert_eq!(controller.state(&"n".into()).unwrap(), ReviewState::Pending);
        assert!(controller.state(&"a".into()).is_err());
    }

    #[test]
    fn test_failed_reset_keeps_generation() {
        let mut controller = teh_cat();
        let result = controller.reset(
            "tiny",
            vec![Annotation::edit("n", 2, 50, AnnotationKind::Grammar, "", "")],
        );

        assert!(matches!(result, Err(AnnotationError::Range { .. })));
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.base_text(), "Teh cat sat.");
    }

    #[test]
    fn test_commit_keeps_offset_unit() {
        let config = EngineConfig::default().with_offset_unit(OffsetUnit::Utf16);
        let mut controller = AnnotationController::from_config(
            "😀 teh",
            vec![Annotation::edit("a", 3, 6, AnnotationKind::Spelling, "the", "")],
            &config,
        )
        .unwrap();

        controller.accept_all();
        let outcome = controller.commit(None).unwrap();
        assert_eq!(outcome.new_text, "😀 the");
        assert_eq!(controller.spans().unit(), OffsetUnit::Utf16);
        assert_eq!(controller.spans().text_len(), 6);
    }

    #[test]
    fn test_report() {
        let mut controller = teh_cat();
        controller.toggle_accept(&"a".into()).unwrap();

        let report = controller.report();
        assert_eq!(report.total, 2);
        assert_eq!(report.accepted, 1);
        assert_eq!(report.pending, 1);
        assert_eq!(report.items[0].original, "Teh");
        assert_eq!(report.items[0].replacement, "The");
        assert_eq!(report.items[1].explanation, "Friendlier");
        assert_eq!(report.by_kind[&AnnotationKind::Style], 1);
    }
}
