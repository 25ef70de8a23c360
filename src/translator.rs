// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Message catalogue of reports.

use std::{borrow::Cow, fmt};

use crate::event::OutcomeCode;

/// Looks up report messages by their keys.
///
/// Unknown keys are returned as is.
pub trait Translator: fmt::Debug {
    /// Message of the given `key`.
    fn translate<'k>(&self, key: &'k str) -> Cow<'k, str>;

    /// Message of the given `key` pluralized for the given `count`.
    fn translate_choice(&self, key: &str, count: usize) -> String;
}

/// Built-in English [`Translator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct English;

impl Translator for English {
    fn translate<'k>(&self, key: &'k str) -> Cow<'k, str> {
        match key {
            "failed_steps_title" => "Failed steps:".into(),
            "pending_steps_title" => "Pending steps:".into(),
            _ => key.into(),
        }
    }

    fn translate_choice(&self, key: &str, count: usize) -> String {
        match key {
            "scenarios_count" => counted(count, "scenario"),
            "steps_count" => counted(count, "step"),
            "failed_teardowns_count" => {
                format!("{count} failed teardown{}", plural_suffix(count))
            }
            _ => key
                .strip_suffix("_count")
                .filter(|o| OutcomeCode::ALL.iter().any(|c| c.as_str() == *o))
                .map_or_else(|| key.to_owned(), |o| format!("{count} {o}")),
        }
    }
}

fn counted(count: usize, noun: &str) -> String {
    match count {
        0 => format!("No {noun}s"),
        n => format!("{n} {noun}{}", plural_suffix(n)),
    }
}

const fn plural_suffix(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
