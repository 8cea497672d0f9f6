//! Undo/redo history for review decisions
//!
//! Records each accept/reject as a reversible change against the
//! controller's state vector. Bulk operations are recorded as one batch so a
//! single undo restores every annotation they touched.

use crate::models::ReviewState;
use std::collections::VecDeque;

/// One annotation's state transition, addressed by its position in the set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChange {
    pub index: usize,
    pub before: ReviewState,
    pub after: ReviewState,
}

/// A reversible review decision
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Toggle on a single annotation
    Single(StateChange),
    /// Bulk operation (accept all, reject all, clear)
    Batch(Vec<StateChange>),
}

impl Decision {
    pub fn changes(&self) -> &[StateChange] {
        match self {
            Decision::Single(change) => std::slice::from_ref(change),
            Decision::Batch(changes) => changes,
        }
    }

    /// Re-apply this decision
    pub fn apply(&self, states: &mut [ReviewState]) {
        for change in self.changes() {
            states[change.index] = change.after;
        }
    }

    /// Reverse this decision (batch in reverse order)
    pub fn revert(&self, states: &mut [ReviewState]) {
        for change in self.changes().iter().rev() {
            states[change.index] = change.before;
        }
    }
}

/// Bounded decision history with a redo tail
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewHistory {
    decisions: VecDeque<Decision>,
    /// Number of decisions currently applied; everything after is redo
    current_index: usize,
    max_size: usize,
}

impl Default for ReviewHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl ReviewHistory {
    /// Create a history keeping at most `max_size` decisions (0 disables it)
    pub fn new(max_size: usize) -> Self {
        Self {
            decisions: VecDeque::new(),
            current_index: 0,
            max_size,
        }
    }

    /// Record a new decision, dropping any redo tail
    pub fn record(&mut self, decision: Decision) {
        if self.max_size == 0 {
            return;
        }

        self.decisions.truncate(self.current_index);
        self.decisions.push_back(decision);

        while self.decisions.len() > self.max_size {
            self.decisions.pop_front();
        }
        self.current_index = self.decisions.len();
    }

    /// Step back; returns the decision to revert
    pub fn undo(&mut self) -> Option<&Decision> {
        if self.current_index == 0 {
            return None;
        }
        self.current_index -= 1;
        self.decisions.get(self.current_index)
    }

    /// Step forward; returns the decision to re-apply
    pub fn redo(&mut self) -> Option<&Decision> {
        let decision = self.decisions.get(self.current_index)?;
        self.current_index += 1;
        Some(decision)
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index < self.decisions.len()
    }

    pub fn clear(&mut self) {
        self.decisions.clear();
        self.current_index = 0;
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReviewState::*;

    fn single(index: usize, before: ReviewState, after: ReviewState) -> Decision {
        Decision::Single(StateChange { index, before, after })
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = ReviewHistory::new(10);
        let mut states = vec![Pending, Pending];

        let decision = single(0, Pending, Accepted);
        decision.apply(&mut states);
        history.record(decision);
        assert_eq!(states, vec![Accepted, Pending]);

        history.undo().unwrap().revert(&mut states);
        assert_eq!(states, vec![Pending, Pending]);
        assert!(!history.can_undo());
        assert!(history.can_redo());

        history.redo().unwrap().apply(&mut states);
        assert_eq!(states, vec![Accepted, Pending]);
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_new_decision_drops_redo_tail() {
        let mut history = ReviewHistory::new(10);
        history.record(single(0, Pending, Accepted));
        history.record(single(1, Pending, Rejected));
        history.undo();
        assert!(history.can_redo());

        history.record(single(0, Accepted, Rejected));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_batch_reverts_every_change() {
        let mut states = vec![Accepted, Pending, Rejected];
        let batch = Decision::Batch(vec![
            StateChange { index: 0, before: Accepted, after: Rejected },
            StateChange { index: 1, before: Pending, after: Rejected },
        ]);

        batch.apply(&mut states);
        assert_eq!(states, vec![Rejected, Rejected, Rejected]);
        batch.revert(&mut states);
        assert_eq!(states, vec![Accepted, Pending, Rejected]);
    }

    #[test]
    fn test_bounded_history_drops_oldest() {
        let mut history = ReviewHistory::new(2);
        history.record(single(0, Pending, Accepted));
        history.record(single(1, Pending, Accepted));
        history.record(single(2, Pending, Accepted));

        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(), Some(&single(2, Pending, Accepted)));
        assert_eq!(history.undo(), Some(&single(1, Pending, Accepted)));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_zero_limit_disables_history() {
        let mut history = ReviewHistory::new(0);
        history.record(single(0, Pending, Accepted));
        assert!(history.is_empty());
        assert!(!history.can_undo());
    }
}
