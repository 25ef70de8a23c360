// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Execution core of a behavior-driven test runner.
//!
//! Two pieces live here:
//! - [`pattern`]: compiling human-authored step patterns (turnip syntax or raw
//!   regular expressions) into a canonical identifier and a [`Matcher`];
//! - [`writer::Progress`]: aggregating step/scenario outcomes delivered as
//!   [`event::Event`]s and rendering a one-character-per-step progress line
//!   followed by a summary.
//!
//! Everything is single-threaded and synchronous: the execution engine pushes
//! every lifecycle event through a [`writer::Dispatcher`] and gets control
//! back only once all subscribed handlers finished.
//!
//! [`Matcher`]: pattern::Matcher

#![forbid(non_ascii_idents, unsafe_code)]
#![warn(missing_docs, unreachable_pub)]

pub mod counter;
pub mod error;
pub mod event;
pub mod pattern;
pub mod presenter;
pub mod teardown;
pub mod translator;
pub mod writer;

#[doc(inline)]
pub use self::{
    error::{DispatchError, PatternError},
    event::{Event, OutcomeCode},
    pattern::{Matcher, Pattern, PatternPolicy, Transformer},
    presenter::ExceptionPresenter,
    teardown::{FailedTeardown, SuccessfulTeardown, Teardown},
    translator::Translator,
    writer::{Dispatcher, Progress},
};
