use std::{fmt, io};

use bdd_core::{
    counter::{MemoryUsage, Timer},
    event::{
        CallResult, Definition, ScenarioFinished, Step, StepError,
        StepFinished, StepResult,
    },
    writer::{
        progress::Cli, Coloring, Dispatcher, SharedDispatcher, WritableString,
    },
    Event, FailedTeardown, OutcomeCode, Progress,
};

const FEATURE: &str = "/srv/app/features/cart.feature";

fn cli() -> Cli {
    Cli {
        color: Coloring::Never,
        no_timer: true,
        base_path: Some("/srv/app".into()),
        ..Cli::default()
    }
}

fn dispatcher(cli: &Cli) -> Dispatcher<Progress<WritableString>> {
    Dispatcher::new(Progress::new(WritableString::default(), cli))
}

fn output(d: &Dispatcher<Progress<WritableString>>) -> &str {
    d.subscriber().output().as_str()
}

fn passed(text: &str, line: u32) -> Event {
    Event::StepFinished(StepFinished::new(
        FEATURE,
        Step::new("Given", text, line),
        OutcomeCode::Passed,
        StepResult::Executed {
            definition: Definition::new(text, "/srv/app/steps/cart.rs:5"),
            call: CallResult::ok(),
        },
    ))
}

fn scenario(line: u32, outcome: OutcomeCode) -> Event {
    Event::ScenarioFinished(ScenarioFinished::new(FEATURE, "Buying", line, outcome))
}

#[test]
fn summarizes_failed_and_pending_steps() {
    let mut d = dispatcher(&cli());

    let events = [
        Event::RunStarted,
        passed("an empty basket", 3),
        passed("I add 3 apples", 4),
        scenario(2, OutcomeCode::Passed),
        passed("an empty basket", 11),
        Event::StepFinished(StepFinished::new(
            FEATURE,
            Step::new("And", "I pay", 12),
            OutcomeCode::Pending,
            StepResult::Executed {
                definition: Definition::new("I pay", "/srv/app/steps/cart.rs:20"),
                call: CallResult::err(StepError::pending("")),
            },
        )),
        Event::StepFinished(StepFinished::new(
            FEATURE,
            Step::new("Then", "I see 3 apples", 13),
            OutcomeCode::Failed,
            StepResult::Executed {
                definition: Definition::new(
                    "I see :n apples",
                    "/srv/app/steps/cart.rs:31",
                ),
                call: CallResult::err(StepError::other(io::Error::new(
                    io::ErrorKind::Other,
                    "expected 3, got 2",
                )))
                .with_stdout("basket: [2]"),
            },
        )),
        scenario(10, OutcomeCode::Failed),
        Event::RunFinished,
    ];
    for ev in &events {
        d.dispatch(ev).unwrap();
    }

    let progress = d.subscriber();
    let stats = progress.statistics();
    assert_eq!(
        stats.steps.iter().collect::<Vec<_>>(),
        [
            (OutcomeCode::Passed, 3),
            (OutcomeCode::Failed, 1),
            (OutcomeCode::Undefined, 0),
            (OutcomeCode::Pending, 1),
            (OutcomeCode::Skipped, 0),
        ],
    );
    assert_eq!(
        stats.scenarios.iter().collect::<Vec<_>>(),
        [
            (OutcomeCode::Passed, 1),
            (OutcomeCode::Failed, 1),
            (OutcomeCode::Undefined, 0),
            (OutcomeCode::Pending, 0),
            (OutcomeCode::Skipped, 0),
        ],
    );
    assert_eq!(progress.failed_steps().len(), 1);
    assert_eq!(progress.failed_scenarios().len(), 1);
    assert_eq!(progress.pending_steps().len(), 1);
    assert!(progress.execution_has_failed());

    assert_eq!(
        output(&d),
        "...PF\n\
         \n\
         --- Failed steps:\n\
         \n    features/cart.feature:10\n      \
         Then I see 3 apples # features/cart.feature:13\n        \
         │ basket: [2]\n        \
         expected 3, got 2\n\
         \n\
         --- Pending steps:\n\
         \n    And I pay # steps/cart.rs:20\n      \
         TODO: write pending definition\n\
         \n\
         2 scenarios (1 passed, 1 failed)\n\
         5 steps (3 passed, 1 failed, 1 pending)\n",
    );
}

#[test]
fn wraps_after_every_seventy_steps() {
    for (steps, wraps) in [(69, 0), (70, 1), (140, 2), (141, 2)] {
        let mut d = dispatcher(&cli());
        d.dispatch(&Event::RunStarted).unwrap();
        for i in 0..steps {
            d.dispatch(&passed("a step", i + 1)).unwrap();
        }

        let printed = output(&d);
        assert_eq!(printed.matches('\n').count(), wraps, "{steps} steps");
        if steps >= 70 {
            assert!(printed.contains(&format!("{} 70\n", ".".repeat(70))));
        }
    }
}

#[test]
fn summary_starts_on_fresh_line() {
    for steps in [69, 70] {
        let mut d = dispatcher(&cli());
        d.dispatch(&Event::RunStarted).unwrap();
        for i in 0..steps {
            d.dispatch(&passed("a step", i + 1)).unwrap();
        }
        d.dispatch(&Event::RunFinished).unwrap();

        let dots = ".".repeat(69);
        let expected = if steps == 70 {
            format!("{dots}. 70\n\nNo scenarios\n70 steps (70 passed)\n")
        } else {
            format!("{dots}\n\nNo scenarios\n69 steps (69 passed)\n")
        };
        assert_eq!(output(&d), expected);
    }
}

#[derive(Debug, Default)]
struct FixedTimer {
    running: bool,
    stopped: bool,
}

impl Timer for FixedTimer {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.stopped = self.running;
        self.running = false;
    }
}

impl fmt::Display for FixedTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stopped {
            f.write_str("1s 500ms")
        } else {
            f.write_str("still running")
        }
    }
}

#[derive(Debug)]
struct FixedMemory;

impl MemoryUsage for FixedMemory {}

impl fmt::Display for FixedMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("12.00 MiB")
    }
}

#[test]
fn prints_timer_and_memory_when_enabled() {
    let cli = Cli {
        no_timer: false,
        ..cli()
    };
    let progress = Progress::new(WritableString::default(), &cli)
        .with_timer(FixedTimer::default())
        .with_memory_usage(FixedMemory);
    let mut d = Dispatcher::new(progress);

    d.dispatch(&Event::RunStarted).unwrap();
    d.dispatch(&passed("a step", 1)).unwrap();
    d.dispatch(&scenario(1, OutcomeCode::Passed)).unwrap();
    d.dispatch(&Event::RunFinished).unwrap();

    assert_eq!(
        output(&d),
        ".\n\n1 scenario (1 passed)\n1 step (1 passed)\n1s 500ms (12.00 MiB)\n",
    );
}

#[test]
fn omits_absent_parts_of_failure() {
    let mut d = dispatcher(&cli());

    d.dispatch(&Event::RunStarted).unwrap();
    d.dispatch(&Event::StepFinished(StepFinished::new(
        FEATURE,
        Step::new("When", "I checkout", 7),
        OutcomeCode::Failed,
        StepResult::SearchFailed(StepError::AmbiguousMatch {
            step: "I checkout".into(),
            count: 2,
        }),
    )))
    .unwrap();
    d.dispatch(&scenario(6, OutcomeCode::Failed)).unwrap();
    d.dispatch(&Event::RunFinished).unwrap();

    let printed = output(&d);
    assert!(printed.contains(
        "    features/cart.feature:6\n      \
         When I checkout # features/cart.feature:7\n        \
         Step match is ambiguous: `I checkout` matches 2 definitions\n\n",
    ));
    assert!(!printed.contains('│'));
    assert!(!printed.contains("Pending steps"));
}

#[test]
fn counts_failed_teardowns_of_steps_and_scenarios() {
    let mut d = dispatcher(&cli());

    d.dispatch(&Event::RunStarted).unwrap();
    d.dispatch(&Event::StepFinished(
        StepFinished::new(
            FEATURE,
            Step::new("Given", "a step", 3),
            OutcomeCode::Passed,
            StepResult::Undefined,
        )
        .with_teardown(FailedTeardown),
    ))
    .unwrap();
    d.dispatch(&Event::ExampleFinished(
        ScenarioFinished::new(FEATURE, "Outline", 9, OutcomeCode::Passed)
            .with_teardown(FailedTeardown),
    ))
    .unwrap();
    d.dispatch(&Event::RunFinished).unwrap();

    let progress = d.subscriber();
    assert_eq!(progress.statistics().failed_teardowns, 2);
    assert!(progress.execution_has_failed());
    assert!(output(&d).ends_with("1 step (1 passed)\n2 failed teardowns\n"));
}

#[test]
fn shared_dispatcher_delivers_to_progress() {
    let shared = SharedDispatcher::from(dispatcher(&cli()));
    let engine = shared.clone();

    engine.dispatch(&Event::RunStarted).unwrap();
    engine.dispatch(&passed("a step", 1)).unwrap();
    engine.dispatch(&scenario(1, OutcomeCode::Passed)).unwrap();
    drop(engine);

    let steps = shared
        .inspect(|p| p.statistics().steps.get(OutcomeCode::Passed))
        .unwrap();
    assert_eq!(steps, 1);

    let progress = shared.try_unwrap().unwrap().into_inner();
    assert!(!progress.execution_has_failed());
    assert_eq!(progress.into_inner().0, ".");
}

#[test]
fn colors_glyphs_when_forced() {
    let cli = Cli {
        color: Coloring::Always,
        ..cli()
    };
    let mut d = dispatcher(&cli);

    d.dispatch(&Event::RunStarted).unwrap();
    d.dispatch(&passed("a step", 1)).unwrap();

    let printed = output(&d);
    assert_ne!(printed, ".");
    assert!(printed.contains('.'));
    assert!(printed.contains('\u{1b}'));
}
