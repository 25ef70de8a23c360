// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of this crate.
//!
//! Step failures are not here: they travel as data on [`event::Event`]s, see
//! [`event::StepError`].
//!
//! [`event::Event`]: crate::event::Event
//! [`event::StepError`]: crate::event::StepError

use std::io;

use derive_more::{Display, Error, From};

use crate::event::EventKind;

/// Error of selecting a [`PatternPolicy`] in a [`Transformer`].
///
/// Malformed turnip syntax is never reported here: it compiles into a
/// [`Matcher`] that simply doesn't match anything.
///
/// [`Matcher`]: crate::Matcher
/// [`PatternPolicy`]: crate::PatternPolicy
/// [`Transformer`]: crate::Transformer
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum PatternError {
    /// No registered policy supports the requested pattern type.
    #[display("Can not find policy for a pattern type `{}`", kind.as_deref().unwrap_or("<default>"))]
    UnsupportedPatternType {
        /// Requested pattern type, [`None`] meaning the default one.
        #[error(not(source))]
        kind: Option<String>,
    },

    /// No registered policy is able to turn the pattern into a regex.
    #[display("Can not find policy for a pattern `{pattern}`")]
    UnsupportedPattern {
        /// Pattern nobody could handle.
        #[error(not(source))]
        pattern: String,
    },
}

/// Error of delivering an [`Event`] through a [`Dispatcher`].
///
/// [`Dispatcher`]: crate::Dispatcher
/// [`Event`]: crate::Event
#[derive(Debug, Display, Error, From)]
pub enum DispatchError {
    /// An event arrived while a previous delivery hasn't returned yet.
    #[display("`{kind}` event delivered while another event is being handled")]
    #[from(ignore)]
    Reentrant {
        /// Kind of the rejected event.
        #[error(not(source))]
        kind: EventKind,
    },

    /// Writing to the output failed.
    #[display("Failed to write output: {_0}")]
    Io(io::Error),
}

/// Result of delivering an [`Event`].
///
/// [`Event`]: crate::Event
pub type DispatchResult<T = ()> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_type_error_names_default_type() {
        let err = PatternError::UnsupportedPatternType { kind: None };
        assert_eq!(
            err.to_string(),
            "Can not find policy for a pattern type `<default>`",
        );

        let err = PatternError::UnsupportedPatternType {
            kind: Some("cucumber".into()),
        };
        assert!(err.to_string().contains("`cucumber`"));
    }

    #[test]
    fn dispatch_error_from_io() {
        let err: DispatchError = io::Error::new(io::ErrorKind::Other, "closed").into();
        assert!(matches!(err, DispatchError::Io(_)));
        assert_eq!(err.to_string(), "Failed to write output: closed");
    }

    #[test]
    fn reentrant_error_mentions_kind() {
        let err = DispatchError::Reentrant {
            kind: EventKind::StepFinished,
        };
        assert_eq!(
            err.to_string(),
            "`step-finished` event delivered while another event is being \
             handled",
        );
    }
}
