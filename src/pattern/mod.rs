// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step patterns and their compilation into [`Matcher`]s.
//!
//! A step definition author writes a pattern in some syntax, each syntax
//! being handled by a [`PatternPolicy`]. The [`Transformer`] holds an ordered
//! set of policies and asks them, in order, whether they support a pattern
//! type (when generating a pattern from step text) or a pattern itself (when
//! compiling it).

pub mod literal;
pub mod matcher;
pub mod regex;
pub mod turnip;

use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
};

use crate::error::PatternError;

#[doc(inline)]
pub use self::{
    literal::{canonical_text, LiteralKind, Token},
    matcher::Matcher,
    regex::RegexPatternPolicy,
    turnip::TurnipPatternPolicy,
};

/// Step pattern generated from a step text.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Pattern {
    canonical_text: String,
    source: String,
    placeholder_count: usize,
}

impl Pattern {
    /// Creates a new [`Pattern`].
    #[must_use]
    pub fn new(
        canonical_text: impl Into<String>,
        source: impl Into<String>,
        placeholder_count: usize,
    ) -> Self {
        Self {
            canonical_text: canonical_text.into(),
            source: source.into(),
            placeholder_count,
        }
    }

    /// Identifier-safe name derived from the step text, suitable for naming a
    /// step definition.
    #[must_use]
    pub fn canonical_text(&self) -> &str {
        &self.canonical_text
    }

    /// Pattern text in the syntax of the [`PatternPolicy`] that generated it.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of arguments the pattern captures.
    #[must_use]
    pub const fn placeholder_count(&self) -> usize {
        self.placeholder_count
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Syntax of step patterns.
pub trait PatternPolicy: fmt::Debug {
    /// Checks whether this policy generates patterns of the given `kind`.
    ///
    /// [`None`] stands for the default kind.
    fn supports_pattern_type(&self, kind: Option<&str>) -> bool;

    /// Generates a [`Pattern`] matching the given `step_text`, turning its
    /// literals into arguments.
    fn generate_pattern(&self, step_text: &str) -> Pattern;

    /// Checks whether the given `pattern` is written in this policy's
    /// syntax.
    fn supports_pattern(&self, pattern: &str) -> bool;

    /// Transforms the given `pattern` into a `regex` crate source.
    ///
    /// Never fails: a malformed `pattern` results in a source that either
    /// doesn't compile or doesn't match, so the [`Matcher`] built from it
    /// never matches.
    fn transform_pattern_to_regex(&self, pattern: &str) -> String;
}

/// Ordered registry of [`PatternPolicy`]s with a cache of compiled
/// [`Matcher`]s.
///
/// The first registered policy supporting a pattern (or pattern type) wins.
pub struct Transformer {
    policies: Vec<Box<dyn PatternPolicy>>,
    cache: HashMap<String, Matcher>,
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("policies", &self.policies)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Default for Transformer {
    /// [`Transformer`] with [`TurnipPatternPolicy`] followed by
    /// [`RegexPatternPolicy`].
    fn default() -> Self {
        Self::empty()
            .with_policy(TurnipPatternPolicy)
            .with_policy(RegexPatternPolicy)
    }
}

impl Transformer {
    /// Creates a [`Transformer`] with the default policies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Transformer`] without any policies.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            policies: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Registers the given `policy` after the already registered ones.
    #[must_use]
    pub fn with_policy(mut self, policy: impl PatternPolicy + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    /// Generates a [`Pattern`] of the given `kind` for the given `step_text`.
    ///
    /// # Errors
    ///
    /// If no registered policy supports the `kind`.
    pub fn generate_pattern(
        &self,
        kind: Option<&str>,
        step_text: &str,
    ) -> Result<Pattern, PatternError> {
        let policy = self
            .policies
            .iter()
            .find(|p| p.supports_pattern_type(kind))
            .ok_or_else(|| PatternError::UnsupportedPatternType {
                kind: kind.map(ToOwned::to_owned),
            })?;
        tracing::trace!(?kind, ?policy, "generating step pattern");

        Ok(policy.generate_pattern(step_text))
    }

    /// Checks whether any registered policy supports the given `pattern`.
    #[must_use]
    pub fn supports_pattern(&self, pattern: &str) -> bool {
        self.policies.iter().any(|p| p.supports_pattern(pattern))
    }

    /// Compiles the given `pattern` into a [`Matcher`], reusing a previously
    /// compiled one.
    ///
    /// # Errors
    ///
    /// If no registered policy supports the `pattern`.
    pub fn transform_pattern_to_regex(
        &mut self,
        pattern: &str,
    ) -> Result<&Matcher, PatternError> {
        match self.cache.entry(pattern.to_owned()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let policy = self
                    .policies
                    .iter()
                    .find(|p| p.supports_pattern(pattern))
                    .ok_or_else(|| PatternError::UnsupportedPattern {
                        pattern: pattern.to_owned(),
                    })?;
                let matcher =
                    Matcher::new(policy.transform_pattern_to_regex(pattern));
                tracing::debug!(
                    %pattern,
                    ?policy,
                    regex = %matcher,
                    "compiled step pattern",
                );
                Ok(e.insert(matcher))
            }
        }
    }
}

/// Removes the backslash in front of every `chars` escape of the given
/// `source`, leaving other escapes intact.
pub(crate) fn unescape(source: &str, chars: &[char]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut iter = source.chars();
    while let Some(c) = iter.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match iter.next() {
            Some(next) if chars.contains(&next) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}
