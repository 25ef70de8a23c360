//! Outcome codes shared by steps and scenarios.

use derive_more::Display;

/// Outcome of a step or a scenario.
///
/// Variants are declared in display order, which is also their [`Ord`]er.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum OutcomeCode {
    /// Executed without errors.
    #[display("passed")]
    Passed,

    /// Execution failed, or no definition could be selected.
    #[display("failed")]
    Failed,

    /// No step definition matches.
    #[display("undefined")]
    Undefined,

    /// Definition matched, but it's not implemented yet.
    #[display("pending")]
    Pending,

    /// Not executed because of a previous outcome.
    #[display("skipped")]
    Skipped,
}

impl OutcomeCode {
    /// All [`OutcomeCode`]s in display order.
    pub const ALL: [Self; 5] = [
        Self::Passed,
        Self::Failed,
        Self::Undefined,
        Self::Pending,
        Self::Skipped,
    ];

    /// Position of this [`OutcomeCode`] in [`OutcomeCode::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
            Self::Undefined => 2,
            Self::Pending => 3,
            Self::Skipped => 4,
        }
    }

    /// Single character printed by a progress output for a step with this
    /// [`OutcomeCode`].
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Passed => '.',
            Self::Failed => 'F',
            Self::Undefined => 'U',
            Self::Pending => 'P',
            Self::Skipped => '-',
        }
    }

    /// Lowercase name of this [`OutcomeCode`], used to build message keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Undefined => "undefined",
            Self::Pending => "pending",
            Self::Skipped => "skipped",
        }
    }
}
