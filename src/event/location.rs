//! Source locations of steps, scenarios and examples.

use std::path::MAIN_SEPARATOR;

use derive_more::Display;

/// Location of a step, scenario or example row inside a feature file.
#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{path}:{line}")]
pub struct Location {
    /// Path to the feature file, as reported by the parser.
    pub path: String,

    /// Line of the feature file.
    pub line: u32,
}

impl Location {
    /// Creates a new [`Location`] with the given path and line.
    #[must_use]
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Renders this [`Location`] as `path:line` with the `path` made relative
    /// to the given `base` directory.
    #[must_use]
    pub fn relative_to(&self, base: &str) -> String {
        format!("{}:{}", relativize(&self.path, base), self.line)
    }
}

/// Strips the `base` directory (followed by the platform's path separator)
/// from the start of the `path`.
///
/// Paths outside of `base` are returned untouched.
#[must_use]
pub fn relativize<'p>(path: &'p str, base: &str) -> &'p str {
    let base = base.strip_suffix(MAIN_SEPARATOR).unwrap_or(base);
    if base.is_empty() {
        return path;
    }
    path.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix(MAIN_SEPARATOR))
        .unwrap_or(path)
}
