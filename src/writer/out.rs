// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for writing output.

use std::{borrow::Cow, io, str, str::FromStr};

use console::Style;
use derive_more::{Deref, DerefMut, Display, From, Into};

use crate::event::OutcomeCode;

/// Possible policies of a [`console`] output coloring.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled()`] to decide, whether output should
    /// be colored.
    Auto,

    /// Forcing of a colored output.
    Always,

    /// Forcing of a non-colored output.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}

/// [`Style`]s for terminal output.
#[derive(Clone, Debug)]
pub struct Styles {
    /// [`Style`] for rendering passed steps and scenarios.
    pub passed: Style,

    /// [`Style`] for rendering failed steps and scenarios.
    pub failed: Style,

    /// [`Style`] for rendering pending steps and scenarios.
    pub pending: Style,

    /// [`Style`] for rendering undefined steps and scenarios.
    pub undefined: Style,

    /// [`Style`] for rendering skipped steps and scenarios.
    pub skipped: Style,

    /// [`Style`] for rendering trailing `# path` comments.
    pub comment: Style,

    /// Indicates whether the terminal was detected.
    pub is_present: bool,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            passed: Style::new().green(),
            failed: Style::new().red(),
            pending: Style::new().yellow(),
            undefined: Style::new().yellow(),
            skipped: Style::new().cyan(),
            comment: Style::new().color256(8),
            is_present: console::user_attended() && console::colors_enabled(),
        }
    }
}

impl Styles {
    /// Creates new [`Styles`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the given [`Coloring`] to these [`Styles`].
    pub fn apply_coloring(&mut self, color: Coloring) {
        match color {
            Coloring::Auto => {}
            Coloring::Always => {
                self.is_present = true;
                for style in [
                    &mut self.passed,
                    &mut self.failed,
                    &mut self.pending,
                    &mut self.undefined,
                    &mut self.skipped,
                    &mut self.comment,
                ] {
                    *style = style.clone().force_styling(true);
                }
            }
            Coloring::Never => self.is_present = false,
        }
    }

    /// [`Style`] of the given [`OutcomeCode`].
    #[must_use]
    pub const fn of(&self, outcome: OutcomeCode) -> &Style {
        match outcome {
            OutcomeCode::Passed => &self.passed,
            OutcomeCode::Failed => &self.failed,
            OutcomeCode::Undefined => &self.undefined,
            OutcomeCode::Pending => &self.pending,
            OutcomeCode::Skipped => &self.skipped,
        }
    }

    /// If terminal is present colors `input` with the [`Style`] of the given
    /// [`OutcomeCode`] or leaves "as is" otherwise.
    #[must_use]
    pub fn outcome<'a>(
        &self,
        outcome: OutcomeCode,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        self.paint(self.of(outcome), input)
    }

    /// If terminal is present colors `input` with [`Styles::failed`] color or
    /// leaves "as is" otherwise.
    #[must_use]
    pub fn failed<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.paint(&self.failed, input)
    }

    /// If terminal is present colors `input` with [`Styles::comment`] color
    /// or leaves "as is" otherwise.
    #[must_use]
    pub fn comment<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.paint(&self.comment, input)
    }

    fn paint<'a>(
        &self,
        style: &Style,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        if self.is_present {
            style.apply_to(input.into()).to_string().into()
        } else {
            input.into()
        }
    }
}

/// [`io::Write`] extension for easier manipulation with strings.
pub trait WriteStrExt: io::Write {
    /// Writes the given `string` into this writer.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_str(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_all(string.as_ref().as_bytes())
    }

    /// Writes the given `string` into this writer followed by a newline.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_line(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_str(string.as_ref())
            .and_then(|()| self.write_str("\n"))
    }
}

impl<T: io::Write + ?Sized> WriteStrExt for T {}

/// [`String`] wrapper implementing [`io::Write`].
#[derive(
    Clone,
    Debug,
    Default,
    Deref,
    DerefMut,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct WritableString(pub String);

impl io::Write for WritableString {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.push_str(
            str::from_utf8(buf)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        );
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
