//! Compiled step matchers.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use linked_hash_map::LinkedHashMap;
use regex::Regex;

/// Separator between a placeholder name and its alias suffix inside a
/// capture group name.
///
/// The `regex` crate has no look-arounds, so a placeholder accepting both
/// quoted and bare values is emitted as several alternative groups named
/// `name`, `name.single`, `name.bare`. Only one of them can participate in
/// a match.
pub const ALIAS_SEPARATOR: char = '.';

/// Compiled regular expression a step text is matched against.
///
/// Compared, ordered and hashed by its source, so it can be used as a key.
/// A source that doesn't compile yields a [`Matcher`] never matching
/// anything.
#[derive(Clone, Debug)]
pub struct Matcher {
    source: String,
    regex: Option<Regex>,
}

impl Matcher {
    /// Compiles the given regex `source`, degrading to a never matching
    /// [`Matcher`] if it's invalid.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        match Regex::new(&source) {
            Ok(regex) => Self {
                source,
                regex: Some(regex),
            },
            Err(e) => {
                tracing::warn!(
                    %source,
                    error = %e,
                    "step pattern doesn't compile, it won't match anything",
                );
                Self::never(source)
            }
        }
    }

    /// Creates a [`Matcher`] with the given `source` that never matches.
    #[must_use]
    pub fn never(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            regex: None,
        }
    }

    /// Regex source of this [`Matcher`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Indicates whether this [`Matcher`] failed to compile and never
    /// matches.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.regex.is_none()
    }

    /// Checks whether the given step `text` matches.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().map_or(false, |re| re.is_match(text))
    }

    /// Matches the given step `text`, returning captured arguments in
    /// declaration order.
    ///
    /// Named groups are keyed by their name (aliases folded), unnamed ones by
    /// their 1-based position. Groups not participating in the match are
    /// omitted. Returns [`None`] if the `text` doesn't match.
    #[must_use]
    pub fn arguments(&self, text: &str) -> Option<LinkedHashMap<String, String>> {
        let regex = self.regex.as_ref()?;
        let caps = regex.captures(text)?;

        let mut args = LinkedHashMap::new();
        for (i, name) in regex.capture_names().enumerate().skip(1) {
            let Some(m) = caps.get(i) else {
                continue;
            };
            let key = name.map_or_else(
                || i.to_string(),
                |n| {
                    n.split_once(ALIAS_SEPARATOR)
                        .map_or(n, |(base, _)| base)
                        .to_owned()
                },
            );
            if !args.contains_key(&key) {
                _ = args.insert(key, m.as_str().to_owned());
            }
        }
        Some(args)
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Matcher {}

impl PartialOrd for Matcher {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Matcher {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source.cmp(&other.source)
    }
}

impl Hash for Matcher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl From<Regex> for Matcher {
    fn from(regex: Regex) -> Self {
        Self {
            source: regex.as_str().to_owned(),
            regex: Some(regex),
        }
    }
}
