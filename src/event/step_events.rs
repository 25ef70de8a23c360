//! Step-level events and errors.

use std::{any::Any, error::Error as StdError, fmt, sync::Arc};

use derive_more::{Display, Error};

use crate::teardown::Teardown;

use super::{Location, OutcomeCode};

/// Panic payload of a step function.
pub type Info = Arc<dyn Any + Send + 'static>;

/// Step as declared in a feature file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    /// Declared type of the step (`Given`, `When`, `Then`, `And`, `But`).
    pub keyword: String,

    /// Text of the step, without its keyword.
    pub text: String,

    /// Line of the feature file the step is declared on.
    pub line: u32,
}

impl Step {
    /// Creates a new [`Step`].
    #[must_use]
    pub fn new(keyword: impl Into<String>, text: impl Into<String>, line: u32) -> Self {
        Self {
            keyword: keyword.into(),
            text: text.into(),
            line,
        }
    }

    /// Returns `keyword text` as shown in reports.
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keyword, self.text)
    }
}

/// Step definition selected for a [`Step`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Definition {
    /// Pattern the definition was registered with.
    pub pattern: String,

    /// Where the definition lives (e.g. `steps/login.rs:42`).
    pub path: String,
}

impl Definition {
    /// Creates a new [`Definition`].
    #[must_use]
    pub fn new(pattern: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            path: path.into(),
        }
    }
}

/// Result of invoking a step [`Definition`].
#[derive(Clone, Debug, Default)]
pub struct CallResult {
    /// Error raised by the invocation, if any.
    pub error: Option<StepError>,

    /// Standard output captured during the invocation, if any.
    pub stdout: Option<String>,
}

impl CallResult {
    /// Creates a [`CallResult`] of an invocation that didn't raise.
    #[must_use]
    pub fn ok() -> Self {
        Self::default()
    }

    /// Creates a [`CallResult`] of an invocation that raised the given
    /// `error`.
    #[must_use]
    pub fn err(error: impl Into<StepError>) -> Self {
        Self {
            error: Some(error.into()),
            stdout: None,
        }
    }

    /// Attaches captured standard output to this [`CallResult`].
    #[must_use]
    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = Some(stdout.into());
        self
    }
}

/// What happened to a [`Step`] between searching for its definition and
/// running it.
#[derive(Clone, Debug)]
pub enum StepResult {
    /// No definition matches the [`Step`].
    Undefined,

    /// Searching for a definition failed (e.g. the match is ambiguous).
    SearchFailed(StepError),

    /// The [`Step`] wasn't executed, possibly despite a matched
    /// [`Definition`].
    Skipped(Option<Definition>),

    /// A [`Definition`] was matched and invoked.
    Executed {
        /// Matched [`Definition`].
        definition: Definition,

        /// Outcome of the invocation.
        call: CallResult,
    },
}

impl StepResult {
    /// Error of searching for a [`Definition`], if any.
    #[must_use]
    pub const fn search_error(&self) -> Option<&StepError> {
        match self {
            Self::SearchFailed(e) => Some(e),
            Self::Undefined | Self::Skipped(_) | Self::Executed { .. } => None,
        }
    }

    /// [`CallResult`] of the invoked [`Definition`], if it was invoked.
    #[must_use]
    pub const fn call(&self) -> Option<&CallResult> {
        match self {
            Self::Executed { call, .. } => Some(call),
            Self::Undefined | Self::SearchFailed(_) | Self::Skipped(_) => None,
        }
    }

    /// Matched [`Definition`], if any.
    #[must_use]
    pub const fn definition(&self) -> Option<&Definition> {
        match self {
            Self::Executed { definition, .. } | Self::Skipped(Some(definition)) => {
                Some(definition)
            }
            Self::Undefined | Self::SearchFailed(_) | Self::Skipped(None) => {
                None
            }
        }
    }

    /// Error to report for this result: a search failure wins over an
    /// invocation failure.
    #[must_use]
    pub fn error(&self) -> Option<&StepError> {
        self.search_error()
            .or_else(|| self.call().and_then(|c| c.error.as_ref()))
    }

    /// Standard output captured while invoking the [`Definition`].
    ///
    /// Always [`None`] when searching failed.
    #[must_use]
    pub fn stdout(&self) -> Option<&str> {
        if self.search_error().is_some() {
            return None;
        }
        self.call().and_then(|c| c.stdout.as_deref())
    }
}

/// Event of a [`Step`] being finished.
#[derive(Clone, Debug)]
pub struct StepFinished {
    /// Path to the feature file containing the [`Step`].
    pub feature_file: String,

    /// Finished [`Step`].
    pub step: Step,

    /// [`OutcomeCode`] the engine assigned to the [`Step`].
    pub outcome: OutcomeCode,

    /// Details of searching and invoking a definition.
    pub result: StepResult,

    /// Result of the cleanup performed after the [`Step`], if any.
    pub teardown: Option<Arc<dyn Teardown>>,
}

impl StepFinished {
    /// Creates a new [`StepFinished`] event without a teardown result.
    #[must_use]
    pub fn new(
        feature_file: impl Into<String>,
        step: Step,
        outcome: OutcomeCode,
        result: StepResult,
    ) -> Self {
        Self {
            feature_file: feature_file.into(),
            step,
            outcome,
            result,
            teardown: None,
        }
    }

    /// Attaches a [`Teardown`] result to this event.
    #[must_use]
    pub fn with_teardown(mut self, teardown: impl Teardown + 'static) -> Self {
        self.teardown = Some(Arc::new(teardown));
        self
    }

    /// [`Location`] of the [`Step`] in its feature file.
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.feature_file.clone(), self.step.line)
    }
}

/// Error of searching for or executing a [`Step`].
#[derive(Clone, Debug, Display, Error)]
pub enum StepError {
    /// [`Step`] doesn't match any definition.
    #[display("Step doesn't match any function")]
    NotFound,

    /// [`Step`] matches multiple definitions.
    #[display("Step match is ambiguous: `{step}` matches {count} definitions")]
    AmbiguousMatch {
        /// Text of the [`Step`].
        #[error(not(source))]
        step: String,

        /// Number of matching definitions.
        count: usize,
    },

    /// Definition is not implemented yet.
    #[display("{}", if _0.is_empty() { "TODO: write pending definition" } else { _0.as_str() })]
    Pending(#[error(not(source))] String),

    /// Step function panicked.
    #[display("Step panicked. Captured output: {}", coerce_error(_0))]
    Panic(#[error(not(source))] Info),

    /// Step function returned an error.
    #[display("{_0}")]
    Other(#[error(not(source))] Arc<dyn StdError + Send + Sync + 'static>),
}

impl StepError {
    /// Creates a [`StepError::Pending`] with the given message.
    #[must_use]
    pub fn pending(msg: impl Into<String>) -> Self {
        Self::Pending(msg.into())
    }

    /// Wraps an arbitrary error returned by a step function.
    #[must_use]
    pub fn other(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Other(Arc::new(err))
    }

    /// Errors this [`StepError`] was caused by, outermost first.
    pub fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        let first = match self {
            Self::Other(e) => e.source(),
            Self::NotFound
            | Self::AmbiguousMatch { .. }
            | Self::Pending(_)
            | Self::Panic(_) => None,
        };
        std::iter::successors(first, |&e| e.source())
    }
}

/// Coerces the given panic payload into a readable message.
#[must_use]
pub fn coerce_error(err: &Info) -> String {
    if let Some(string) = err.downcast_ref::<String>() {
        string.clone()
    } else if let Some(&string) = err.downcast_ref::<&str>() {
        string.to_owned()
    } else {
        "(Could not resolve panic payload)".to_owned()
    }
}
