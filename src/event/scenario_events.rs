//! Scenario-level (and outline example-level) events.

use std::sync::Arc;

use crate::teardown::Teardown;

use super::{Location, OutcomeCode};

/// Event of a scenario, or of a single example row of a scenario outline,
/// being finished.
#[derive(Clone, Debug)]
pub struct ScenarioFinished {
    /// Path to the feature file containing the scenario.
    pub feature_file: String,

    /// Title of the scenario (or of the outline the example belongs to).
    pub title: String,

    /// Line of the scenario header, or of the example row.
    pub line: u32,

    /// [`OutcomeCode`] the engine assigned to the scenario.
    pub outcome: OutcomeCode,

    /// Result of the cleanup performed after the scenario, if any.
    pub teardown: Option<Arc<dyn Teardown>>,
}

impl ScenarioFinished {
    /// Creates a new [`ScenarioFinished`] event without a teardown result.
    #[must_use]
    pub fn new(
        feature_file: impl Into<String>,
        title: impl Into<String>,
        line: u32,
        outcome: OutcomeCode,
    ) -> Self {
        Self {
            feature_file: feature_file.into(),
            title: title.into(),
            line,
            outcome,
            teardown: None,
        }
    }

    /// Attaches a [`Teardown`] result to this event.
    #[must_use]
    pub fn with_teardown(mut self, teardown: impl Teardown + 'static) -> Self {
        self.teardown = Some(Arc::new(teardown));
        self
    }

    /// [`Location`] of the scenario (or example row) in its feature file.
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.feature_file.clone(), self.line)
    }
}
