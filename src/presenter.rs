// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turning [`StepError`]s into human-readable text.

use std::fmt::{self, Write as _};

use crate::event::StepError;

/// Renders a [`StepError`] for a report.
pub trait ExceptionPresenter: fmt::Debug {
    /// Presents the given `error` as (possibly multi-line) text.
    fn present(&self, error: &StepError) -> String;
}

/// Default [`ExceptionPresenter`].
///
/// Prints the error message only, additionally listing the errors it was
/// caused by when `verbosity` is non-zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct Presenter {
    verbosity: u8,
}

impl Presenter {
    /// Creates a new [`Presenter`] of the given `verbosity`.
    #[must_use]
    pub const fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }
}

impl ExceptionPresenter for Presenter {
    fn present(&self, error: &StepError) -> String {
        let mut out = error.to_string();
        if self.verbosity > 0 {
            for cause in error.causes() {
                _ = write!(out, "\nCaused by: {cause}");
            }
        }
        out
    }
}
