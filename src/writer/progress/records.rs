//! Details of failed and pending steps kept until the end of a run.

use crate::{
    event::{location::relativize, StepFinished},
    presenter::ExceptionPresenter,
};

/// Failed step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FailureRecord {
    /// Keyword and text of the step.
    pub description: String,

    /// `path:line` of the step, relative to the base path.
    pub location: String,

    /// Presented error, empty if the step failed without one.
    pub message: String,

    /// Output captured while running the step definition. Always [`None`]
    /// if no definition could be selected.
    pub stdout: Option<String>,

    /// Index of the failed scenario location this step belongs to.
    ///
    /// The enclosing scenario finishes after its steps, so this is the
    /// number of failed scenarios recorded when the step finished.
    pub scenario: usize,
}

impl FailureRecord {
    /// Creates a [`FailureRecord`] of the given failed `step`.
    #[must_use]
    pub fn new(
        step: &StepFinished,
        base_path: &str,
        presenter: &dyn ExceptionPresenter,
        scenario: usize,
    ) -> Self {
        Self {
            description: step.step.description(),
            location: step.location().relative_to(base_path),
            message: step
                .result
                .error()
                .map(|e| presenter.present(e))
                .unwrap_or_default(),
            stdout: step.result.stdout().map(ToOwned::to_owned),
            scenario,
        }
    }
}

/// Pending step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingRecord {
    /// Keyword and text of the step.
    pub description: String,

    /// Path of the matched step definition, relative to the base path.
    pub location: String,

    /// Presented pending message.
    pub message: String,
}

impl PendingRecord {
    /// Creates a [`PendingRecord`] of the given pending `step`.
    ///
    /// Falls back to the step location if no definition was matched.
    #[must_use]
    pub fn new(
        step: &StepFinished,
        base_path: &str,
        presenter: &dyn ExceptionPresenter,
    ) -> Self {
        let location = step.result.definition().map_or_else(
            || step.location().relative_to(base_path),
            |d| relativize(&d.path, base_path).to_owned(),
        );
        let message = step
            .result
            .call()
            .and_then(|c| c.error.as_ref())
            .map(|e| presenter.present(e))
            .unwrap_or_default();

        Self {
            description: step.step.description(),
            location,
            message,
        }
    }
}
