// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcome of cleanup actions performed around steps and scenarios.

use std::fmt::Debug;

/// Result of a cleanup action, reduced to a success/failure signal.
///
/// Failures are never raised: whoever orchestrates setup/cleanup passes this
/// value along and callers decide by [`Teardown::is_successful()`] only.
pub trait Teardown: Debug + Send + Sync {
    /// Indicates whether the cleanup succeeded.
    #[must_use]
    fn is_successful(&self) -> bool;
}

/// [`Teardown`] that always succeeds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SuccessfulTeardown;

impl Teardown for SuccessfulTeardown {
    fn is_successful(&self) -> bool {
        true
    }
}

/// [`Teardown`] that always fails.
///
/// Used when a setup phase couldn't even begin, so there is no real cleanup
/// to run. It's a regular failed [`Teardown`] for anyone inspecting it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FailedTeardown;

impl Teardown for FailedTeardown {
    fn is_successful(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn successful_teardown_is_successful() {
        assert!(SuccessfulTeardown.is_successful());
    }

    #[test]
    fn failed_teardown_is_not_successful() {
        assert!(!FailedTeardown.is_successful());
    }

    #[test]
    fn trait_objects_answer_the_same() {
        let teardowns: Vec<Arc<dyn Teardown>> =
            vec![Arc::new(SuccessfulTeardown), Arc::new(FailedTeardown)];

        let flags = teardowns
            .iter()
            .map(|t| t.is_successful())
            .collect::<Vec<_>>();

        assert_eq!(flags, [true, false]);
    }
}
