//! Outcome counters of a run.

use crate::event::OutcomeCode;

/// Number of steps (or scenarios) per [`OutcomeCode`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    counts: [usize; OutcomeCode::ALL.len()],
}

impl Stats {
    /// Creates new [`Stats`] with every [`OutcomeCode`] at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; OutcomeCode::ALL.len()],
        }
    }

    /// Counts one more item of the given `outcome`.
    pub fn record(&mut self, outcome: OutcomeCode) {
        self.counts[outcome.index()] += 1;
    }

    /// Number of items of the given `outcome`.
    #[must_use]
    pub const fn get(&self, outcome: OutcomeCode) -> usize {
        self.counts[outcome.index()]
    }

    /// Total number of items these [`Stats`] have been collected for.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Counters in display order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (OutcomeCode, usize)> + '_ {
        OutcomeCode::ALL.into_iter().map(|o| (o, self.get(o)))
    }
}

/// [`Stats`] of both granularities plus teardown failures.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunStatistics {
    /// Per-step [`Stats`].
    pub steps: Stats,

    /// Per-scenario (and per-example) [`Stats`].
    pub scenarios: Stats,

    /// Number of finished steps and scenarios reporting a failed teardown.
    pub failed_teardowns: usize,
}

impl RunStatistics {
    /// Indicates whether anything failed: a step, a scenario or a teardown.
    #[must_use]
    pub const fn execution_has_failed(&self) -> bool {
        self.steps.get(OutcomeCode::Failed) > 0
            || self.scenarios.get(OutcomeCode::Failed) > 0
            || self.failed_teardowns > 0
    }
}
