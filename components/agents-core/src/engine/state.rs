//! Per-invocation executor state.

use crate::types::{Outcome, Step};
use std::collections::BTreeMap;

/// Where an executor invocation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Executing the round with this zero-based index.
    Running(u32),
    /// The planner produced a finish.
    Finished,
    /// The iteration budget ran out.
    Exhausted,
}

/// Step history and round counter of a single `call`.
///
/// Never shared between invocations, so no locking is needed.
#[derive(Debug)]
pub(crate) struct RunState {
    pub(crate) steps: Vec<Step>,
    started: u32,
    phase: Phase,
}

impl RunState {
    pub(crate) fn new() -> Self {
        Self {
            steps: Vec::new(),
            started: 0,
            phase: Phase::Running(0),
        }
    }

    /// Enters the next round, or moves to [`Phase::Exhausted`] when `max`
    /// rounds have already been started.
    pub(crate) fn next_round(&mut self, max: u32) -> Option<u32> {
        if self.started >= max {
            self.phase = Phase::Exhausted;
            return None;
        }
        let round = self.started;
        self.started += 1;
        self.phase = Phase::Running(round);
        Some(round)
    }

    pub(crate) fn record(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub(crate) fn finish(&mut self) {
        self.phase = Phase::Finished;
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Consumes the state into an outcome carrying `values`.
    pub(crate) fn into_outcome(
        self,
        values: BTreeMap<String, String>,
        with_steps: bool,
    ) -> Outcome {
        Outcome {
            values,
            intermediate_steps: with_steps.then_some(self.steps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Action;

    #[test]
    fn test_rounds_are_bounded() {
        let mut state = RunState::new();
        assert_eq!(state.next_round(2), Some(0));
        assert_eq!(state.phase(), Phase::Running(0));
        assert_eq!(state.next_round(2), Some(1));
        assert_eq!(state.next_round(2), None);
        assert_eq!(state.phase(), Phase::Exhausted);
    }

    #[test]
    fn test_finish_phase() {
        let mut state = RunState::new();
        state.next_round(5);
        state.finish();
        assert_eq!(state.phase(), Phase::Finished);
    }

    #[test]
    fn test_outcome_steps_only_when_requested() {
        let mut state = RunState::new();
        state.record(Step::new(Action::default(), "obs"));
        let outcome = state.into_outcome(BTreeMap::new(), false);
        assert!(outcome.intermediate_steps.is_none());

        let mut state = RunState::new();
        state.record(Step::new(Action::default(), "obs"));
        let outcome = state.into_outcome(BTreeMap::new(), true);
        assert_eq!(outcome.steps().len(), 1);
    }
}
