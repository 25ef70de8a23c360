// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Formatter printing one character per step and a summary at the end.
//!
//! ```text
//! ..F-P.U.
//!
//! --- Failed steps:
//!
//!     features/cart.feature:5
//!       Then I see 3 apples # features/cart.feature:9
//!         expected 3, got 2
//!
//! 3 scenarios (2 passed, 1 failed)
//! 8 steps (4 passed, 1 failed, 1 undefined, 1 pending, 1 skipped)
//! 12ms (9.31 MiB)
//! ```

pub mod cli;
pub mod formatting;
pub mod records;
pub mod stats;

use std::{env, io};

use crate::{
    counter::{MemoryUsage, PeakMemory, Stopwatch, Timer},
    event::{Event, EventKind, OutcomeCode},
    presenter::{ExceptionPresenter, Presenter},
    translator::{English, Translator},
    writer::{
        dispatch::{Subscriber, Subscription},
        out::{Styles, WriteStrExt as _},
    },
};

#[doc(inline)]
pub use self::{
    cli::Cli,
    records::{FailureRecord, PendingRecord},
    stats::{RunStatistics, Stats},
};

/// Number of step characters printed on a single line.
pub const STEPS_PER_LINE: usize = 70;

/// Possible states of a [`Progress`] formatter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Run-finished event hasn't been encountered yet.
    InProgress,

    /// Run-finished event was encountered and the summary was output.
    Finished,
}

/// Formatter printing one character per finished step, followed by failed
/// and pending steps details and statistics once the run finishes.
///
/// Handles [`Event`]s delivered by a [`Dispatcher`].
///
/// [`Dispatcher`]: crate::writer::Dispatcher
#[derive(Debug)]
pub struct Progress<Out: io::Write = io::Stdout> {
    output: Out,
    styles: Styles,
    translator: Box<dyn Translator>,
    presenter: Box<dyn ExceptionPresenter>,
    timer: Box<dyn Timer>,
    memory: Box<dyn MemoryUsage>,
    base_path: String,
    show_timer: bool,
    state: State,
    stats: RunStatistics,
    steps_printed: usize,
    failed_scenarios: Vec<String>,
    failed_steps: Vec<FailureRecord>,
    pending_steps: Vec<PendingRecord>,
}

impl Progress {
    /// Creates a new [`Progress`] formatter writing to [`io::Stdout`].
    #[must_use]
    pub fn stdout(cli: &Cli) -> Self {
        Self::new(io::stdout(), cli)
    }
}

impl<Out: io::Write> Progress<Out> {
    /// Creates a new [`Progress`] formatter writing to the given `output`.
    #[must_use]
    pub fn new(output: Out, cli: &Cli) -> Self {
        let mut styles = Styles::new();
        styles.apply_coloring(cli.color);

        let base_path = cli
            .base_path
            .clone()
            .or_else(|| env::current_dir().ok())
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        Self {
            output,
            styles,
            translator: Box::new(English),
            presenter: Box::new(Presenter::new(cli.verbose)),
            timer: Box::new(Stopwatch::new()),
            memory: Box::new(PeakMemory),
            base_path,
            show_timer: !cli.no_timer,
            state: State::InProgress,
            stats: RunStatistics::default(),
            steps_printed: 0,
            failed_scenarios: Vec::new(),
            failed_steps: Vec::new(),
            pending_steps: Vec::new(),
        }
    }

    /// Replaces the [`Translator`] of messages.
    #[must_use]
    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    /// Replaces the [`ExceptionPresenter`] of step errors.
    #[must_use]
    pub fn with_presenter(
        mut self,
        presenter: impl ExceptionPresenter + 'static,
    ) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    /// Replaces the [`Timer`] measuring the run.
    #[must_use]
    pub fn with_timer(mut self, timer: impl Timer + 'static) -> Self {
        self.timer = Box::new(timer);
        self
    }

    /// Replaces the [`MemoryUsage`] sampler.
    #[must_use]
    pub fn with_memory_usage(mut self, memory: impl MemoryUsage + 'static) -> Self {
        self.memory = Box::new(memory);
        self
    }

    /// Replaces the [`Styles`] of the output.
    #[must_use]
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Collected [`RunStatistics`].
    #[must_use]
    pub const fn statistics(&self) -> &RunStatistics {
        &self.stats
    }

    /// Indicates whether any step, scenario or teardown failed.
    #[must_use]
    pub const fn execution_has_failed(&self) -> bool {
        self.stats.execution_has_failed()
    }

    /// [`FailureRecord`]s of the failed steps.
    #[must_use]
    pub fn failed_steps(&self) -> &[FailureRecord] {
        &self.failed_steps
    }

    /// [`PendingRecord`]s of the pending steps.
    #[must_use]
    pub fn pending_steps(&self) -> &[PendingRecord] {
        &self.pending_steps
    }

    /// Locations of the failed scenarios and examples.
    #[must_use]
    pub fn failed_scenarios(&self) -> &[String] {
        &self.failed_scenarios
    }

    /// Number of step characters printed so far.
    #[must_use]
    pub const fn steps_printed(&self) -> usize {
        self.steps_printed
    }

    /// Returns the output this [`Progress`] writes to.
    #[must_use]
    pub const fn output(&self) -> &Out {
        &self.output
    }

    /// Unwraps this [`Progress`] into its output.
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }

    fn start_run(&mut self, _: &Event) -> io::Result<()> {
        tracing::debug!("run started, resetting progress");

        self.state = State::InProgress;
        self.stats = RunStatistics::default();
        self.steps_printed = 0;
        self.failed_scenarios.clear();
        self.failed_steps.clear();
        self.pending_steps.clear();
        self.timer.start();
        Ok(())
    }

    fn collect_scenario_stats(&mut self, ev: &Event) -> io::Result<()> {
        if self.state == State::Finished {
            tracing::debug!(
                event = %ev.kind(),
                "run already finished, event ignored",
            );
            return Ok(());
        }
        let (Event::ScenarioFinished(sc) | Event::ExampleFinished(sc)) = ev else {
            return Ok(());
        };

        self.stats.scenarios.record(sc.outcome);
        self.count_teardown(ev);
        if sc.outcome == OutcomeCode::Failed {
            self.failed_scenarios
                .push(sc.location().relative_to(&self.base_path));
        }
        Ok(())
    }

    fn print_step_character(&mut self, ev: &Event) -> io::Result<()> {
        if self.state == State::Finished {
            tracing::debug!(
                event = %ev.kind(),
                "run already finished, event ignored",
            );
            return Ok(());
        }
        let Event::StepFinished(step) = ev else {
            return Ok(());
        };

        self.stats.steps.record(step.outcome);
        self.count_teardown(ev);
        match step.outcome {
            OutcomeCode::Failed => self.failed_steps.push(FailureRecord::new(
                step,
                &self.base_path,
                &*self.presenter,
                self.failed_scenarios.len(),
            )),
            OutcomeCode::Pending => self.pending_steps.push(PendingRecord::new(
                step,
                &self.base_path,
                &*self.presenter,
            )),
            OutcomeCode::Passed | OutcomeCode::Undefined | OutcomeCode::Skipped => {}
        }

        let glyph = step.outcome.glyph().to_string();
        self.output
            .write_str(self.styles.outcome(step.outcome, glyph))?;
        self.steps_printed += 1;
        if self.steps_printed % STEPS_PER_LINE == 0 {
            self.output.write_line(format!(" {}", self.steps_printed))?;
        }
        self.output.flush()
    }

    fn print_statistics(&mut self, _: &Event) -> io::Result<()> {
        if self.state == State::Finished {
            tracing::debug!("run already finished, summary is not repeated");
            return Ok(());
        }
        self.state = State::Finished;
        self.timer.stop();

        tracing::debug!(
            steps = self.stats.steps.total(),
            scenarios = self.stats.scenarios.total(),
            failed = self.execution_has_failed(),
            "printing run summary",
        );

        if self.steps_printed % STEPS_PER_LINE != 0 {
            self.output.write_str("\n")?;
        }
        self.output.write_str("\n")?;

        let (styles, translator) = (&self.styles, &*self.translator);
        let mut summary = formatting::failed_steps(
            styles,
            translator,
            &self.failed_steps,
            &self.failed_scenarios,
        );
        summary.push_str(&formatting::pending_steps(
            styles,
            translator,
            &self.pending_steps,
        ));
        summary.push_str(&formatting::stats_line(
            styles,
            translator,
            "scenarios_count",
            self.stats.scenarios,
        ));
        summary.push_str(&formatting::stats_line(
            styles,
            translator,
            "steps_count",
            self.stats.steps,
        ));
        summary.push_str(&formatting::failed_teardowns(
            styles,
            translator,
            self.stats.failed_teardowns,
        ));
        if self.show_timer {
            summary.push_str(&format!("{} ({})\n", self.timer, self.memory));
        }

        self.output.write_str(summary)?;
        self.output.flush()
    }

    fn count_teardown(&mut self, ev: &Event) {
        if ev.teardown().is_some_and(|t| !t.is_successful()) {
            self.stats.failed_teardowns += 1;
        }
    }
}

impl<Out: io::Write> Subscriber for Progress<Out> {
    fn subscriptions() -> Vec<Subscription<Self>> {
        vec![
            Subscription::new(EventKind::RunStarted, 999, Self::start_run),
            Subscription::new(EventKind::RunFinished, -50, Self::print_statistics),
            Subscription::new(
                EventKind::ScenarioFinished,
                999,
                Self::collect_scenario_stats,
            ),
            Subscription::new(
                EventKind::ExampleFinished,
                999,
                Self::collect_scenario_stats,
            ),
            Subscription::new(
                EventKind::StepFinished,
                -50,
                Self::print_step_character,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        event::{CallResult, Definition, ScenarioFinished, Step, StepError, StepFinished, StepResult},
        teardown::{FailedTeardown, SuccessfulTeardown},
        writer::{
            dispatch::Dispatcher,
            out::{Coloring, WritableString},
        },
    };

    fn progress() -> Dispatcher<Progress<WritableString>> {
        let cli = Cli {
            color: Coloring::Never,
            no_timer: true,
            base_path: Some("/srv/app".into()),
            ..Cli::default()
        };
        Dispatcher::new(Progress::new(WritableString::default(), &cli))
    }

    fn step(outcome: OutcomeCode) -> Event {
        let result = match outcome {
            OutcomeCode::Failed => StepResult::Executed {
                definition: Definition::new("it breaks", "/srv/app/steps.rs:1"),
                call: CallResult::err(StepError::pending("boom")),
            },
            OutcomeCode::Undefined => StepResult::Undefined,
            _ => StepResult::Executed {
                definition: Definition::new("it works", "/srv/app/steps.rs:2"),
                call: CallResult::ok(),
            },
        };
        Event::StepFinished(StepFinished::new(
            "/srv/app/a.feature",
            Step::new("Given", "something", 4),
            outcome,
            result,
        ))
    }

    fn scenario(outcome: OutcomeCode) -> ScenarioFinished {
        ScenarioFinished::new("/srv/app/a.feature", "Something", 3, outcome)
    }

    #[test]
    fn prints_one_glyph_per_step() {
        let mut d = progress();
        d.dispatch(&Event::RunStarted).unwrap();
        for outcome in OutcomeCode::ALL {
            d.dispatch(&step(outcome)).unwrap();
        }

        assert_eq!(d.subscriber().output().as_str(), ".FUP-");
        assert_eq!(d.subscriber().steps_printed(), 5);
    }

    #[test]
    fn pairs_failed_step_with_scenario() {
        let mut d = progress();
        d.dispatch(&Event::RunStarted).unwrap();
        d.dispatch(&step(OutcomeCode::Failed)).unwrap();
        d.dispatch(&Event::ScenarioFinished(scenario(OutcomeCode::Failed)))
            .unwrap();
        d.dispatch(&step(OutcomeCode::Failed)).unwrap();
        d.dispatch(&Event::ExampleFinished(scenario(OutcomeCode::Failed)))
            .unwrap();

        let p = d.subscriber();
        assert_eq!(p.failed_scenarios(), ["a.feature:3", "a.feature:3"]);
        assert_eq!(
            p.failed_steps().iter().map(|r| r.scenario).collect::<Vec<_>>(),
            [0, 1],
        );
        assert_eq!(p.failed_steps()[0].location, "a.feature:4");
        assert_eq!(p.failed_steps()[0].message, "boom");
    }

    #[test]
    fn counts_failed_teardowns() {
        let mut d = progress();
        d.dispatch(&Event::RunStarted).unwrap();
        d.dispatch(&Event::ScenarioFinished(
            scenario(OutcomeCode::Passed).with_teardown(SuccessfulTeardown),
        ))
        .unwrap();
        assert!(!d.subscriber().execution_has_failed());

        d.dispatch(&Event::ScenarioFinished(
            scenario(OutcomeCode::Passed).with_teardown(FailedTeardown),
        ))
        .unwrap();
        assert!(d.subscriber().execution_has_failed());
        assert_eq!(d.subscriber().statistics().failed_teardowns, 1);

        d.dispatch(&Event::RunFinished).unwrap();
        assert!(d
            .subscriber()
            .output()
            .as_str()
            .ends_with("2 scenarios (2 passed)\nNo steps\n1 failed teardown\n"));
    }

    #[test]
    fn summary_is_printed_once() {
        let mut d = progress();
        d.dispatch(&Event::RunStarted).unwrap();
        d.dispatch(&step(OutcomeCode::Passed)).unwrap();
        d.dispatch(&Event::RunFinished).unwrap();
        let printed = d.subscriber().output().as_str().to_owned();

        d.dispatch(&step(OutcomeCode::Failed)).unwrap();
        d.dispatch(&Event::RunFinished).unwrap();

        assert_eq!(d.subscriber().output().as_str(), printed);
        assert_eq!(d.subscriber().statistics().steps.total(), 1);
        assert_eq!(printed, ".\n\nNo scenarios\n1 step (1 passed)\n");
    }

    #[test]
    fn late_events_are_logged_and_ignored() {
        struct LogsWriter(Arc<Mutex<Vec<u8>>>);
        impl std::io::Write for LogsWriter {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().write(buf)
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let logs = Arc::new(Mutex::new(Vec::new()));
        let writer_logs = Arc::clone(&logs);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || LogsWriter(Arc::clone(&writer_logs)))
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();

        let d = tracing::subscriber::with_default(subscriber, || {
            let mut d = progress();
            d.dispatch(&Event::RunStarted).unwrap();
            d.dispatch(&Event::RunFinished).unwrap();
            d.dispatch(&step(OutcomeCode::Passed)).unwrap();
            d.dispatch(&Event::ScenarioFinished(scenario(OutcomeCode::Passed)))
                .unwrap();
            d
        });

        assert_eq!(d.subscriber().statistics().steps.total(), 0);
        assert_eq!(d.subscriber().statistics().scenarios.total(), 0);

        let logs = String::from_utf8(logs.lock().unwrap().clone()).unwrap();
        assert_eq!(
            logs.matches("run already finished, event ignored").count(),
            2,
            "{logs}",
        );
    }

    #[test]
    fn run_start_resets_everything() {
        let mut d = progress();
        d.dispatch(&step(OutcomeCode::Failed)).unwrap();
        d.dispatch(&Event::ScenarioFinished(scenario(OutcomeCode::Failed)))
            .unwrap();
        d.dispatch(&Event::RunFinished).unwrap();

        d.dispatch(&Event::RunStarted).unwrap();
        let p = d.subscriber();
        assert_eq!(*p.statistics(), RunStatistics::default());
        assert!(p.failed_steps().is_empty());
        assert!(p.failed_scenarios().is_empty());
        assert_eq!(p.steps_printed(), 0);
    }

    #[test]
    fn subscribes_with_expected_priorities() {
        let d = progress();

        assert_eq!(d.priorities(EventKind::RunStarted), [999]);
        assert_eq!(d.priorities(EventKind::ScenarioFinished), [999]);
        assert_eq!(d.priorities(EventKind::ExampleFinished), [999]);
        assert_eq!(d.priorities(EventKind::StepFinished), [-50]);
        assert_eq!(d.priorities(EventKind::RunFinished), [-50]);
    }
}
