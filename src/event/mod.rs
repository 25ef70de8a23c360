//! Key occurrences in a lifecycle of a test run.
//!
//! The top-level enum here is [`Event`]. The execution engine raises them
//! synchronously, in the order things happen, and never concurrently.

pub mod location;
pub mod outcome;
pub mod scenario_events;
pub mod step_events;

use derive_more::Display;

use crate::teardown::Teardown;

pub use self::{
    location::Location,
    outcome::OutcomeCode,
    scenario_events::ScenarioFinished,
    step_events::{
        CallResult, Definition, Info, Step, StepError, StepFinished,
        StepResult,
    },
};

/// Lifecycle event of a test run.
#[derive(Clone, Debug)]
pub enum Event {
    /// Run is about to execute its first feature.
    RunStarted,

    /// Run executed everything it was scheduled to.
    RunFinished,

    /// Scenario finished.
    ScenarioFinished(ScenarioFinished),

    /// Example row of a scenario outline finished.
    ExampleFinished(ScenarioFinished),

    /// Step finished.
    StepFinished(StepFinished),
}

impl Event {
    /// Returns the [`EventKind`] of this [`Event`].
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::RunStarted => EventKind::RunStarted,
            Self::RunFinished => EventKind::RunFinished,
            Self::ScenarioFinished(_) => EventKind::ScenarioFinished,
            Self::ExampleFinished(_) => EventKind::ExampleFinished,
            Self::StepFinished(_) => EventKind::StepFinished,
        }
    }

    /// [`OutcomeCode`] carried by this [`Event`], if any.
    #[must_use]
    pub const fn outcome(&self) -> Option<OutcomeCode> {
        match self {
            Self::RunStarted | Self::RunFinished => None,
            Self::ScenarioFinished(ev) | Self::ExampleFinished(ev) => {
                Some(ev.outcome)
            }
            Self::StepFinished(ev) => Some(ev.outcome),
        }
    }

    /// [`Teardown`] result carried by this [`Event`], if any.
    #[must_use]
    pub fn teardown(&self) -> Option<&dyn Teardown> {
        match self {
            Self::RunStarted | Self::RunFinished => None,
            Self::ScenarioFinished(ev) | Self::ExampleFinished(ev) => {
                ev.teardown.as_deref()
            }
            Self::StepFinished(ev) => ev.teardown.as_deref(),
        }
    }
}

/// Kind of an [`Event`], used to subscribe handlers.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum EventKind {
    /// [`Event::RunStarted`].
    #[display("run-started")]
    RunStarted,

    /// [`Event::RunFinished`].
    #[display("run-finished")]
    RunFinished,

    /// [`Event::ScenarioFinished`].
    #[display("scenario-finished")]
    ScenarioFinished,

    /// [`Event::ExampleFinished`].
    #[display("example-finished")]
    ExampleFinished,

    /// [`Event::StepFinished`].
    #[display("step-finished")]
    StepFinished,
}
