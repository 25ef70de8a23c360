//! Rendering of the end-of-run report sections.

use std::fmt::Write as _;

use itertools::Itertools as _;

use crate::{event::OutcomeCode, translator::Translator, writer::out::Styles};

use super::{
    records::{FailureRecord, PendingRecord},
    stats::Stats,
};

/// Prefix of every captured output line.
const STDOUT_PREFIX: &str = "        │ ";

/// Formats the failed steps section, pairing every record with its failed
/// scenario location.
///
/// Empty if there are no `records`.
#[must_use]
pub fn failed_steps(
    styles: &Styles,
    translator: &dyn Translator,
    records: &[FailureRecord],
    failed_scenarios: &[String],
) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut out = title(
        styles,
        OutcomeCode::Failed,
        &translator.translate("failed_steps_title"),
    );
    for rec in records {
        if let Some(scenario) = failed_scenarios.get(rec.scenario) {
            _ = writeln!(out, "    {}", styles.failed(scenario.as_str()));
        }
        _ = writeln!(
            out,
            "      {} {}",
            styles.failed(rec.description.as_str()),
            styles.comment(format!("# {}", rec.location)),
        );
        if let Some(stdout) = &rec.stdout {
            for line in stdout.split('\n') {
                _ = writeln!(out, "{STDOUT_PREFIX}{line}");
            }
        }
        out.push_str(&indented(styles, OutcomeCode::Failed, &rec.message, 8));
        out.push('\n');
    }
    out
}

/// Formats the pending steps section.
///
/// Empty if there are no `records`.
#[must_use]
pub fn pending_steps(
    styles: &Styles,
    translator: &dyn Translator,
    records: &[PendingRecord],
) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut out = title(
        styles,
        OutcomeCode::Pending,
        &translator.translate("pending_steps_title"),
    );
    for rec in records {
        _ = writeln!(
            out,
            "    {} {}",
            styles.outcome(OutcomeCode::Pending, rec.description.as_str()),
            styles.comment(format!("# {}", rec.location)),
        );
        out.push_str(&indented(styles, OutcomeCode::Pending, &rec.message, 6));
        out.push('\n');
    }
    out
}

/// Formats a one-line summary of the given [`Stats`], like
/// `3 steps (2 passed, 1 failed)`.
///
/// `total_key` is the message key of the total count.
#[must_use]
pub fn stats_line(
    styles: &Styles,
    translator: &dyn Translator,
    total_key: &str,
    stats: Stats,
) -> String {
    let details = stats
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(o, n)| {
            let message = translator.translate_choice(&format!("{o}_count"), n);
            styles.outcome(o, message)
        })
        .join(", ");

    let total = translator.translate_choice(total_key, stats.total());
    if details.is_empty() {
        format!("{total}\n")
    } else {
        format!("{total} ({details})\n")
    }
}

/// Formats the failed teardowns line.
///
/// Empty if nothing failed.
#[must_use]
pub fn failed_teardowns(
    styles: &Styles,
    translator: &dyn Translator,
    count: usize,
) -> String {
    if count == 0 {
        return String::new();
    }
    format!(
        "{}\n",
        styles.failed(
            translator.translate_choice("failed_teardowns_count", count),
        ),
    )
}

fn title(styles: &Styles, outcome: OutcomeCode, text: &str) -> String {
    format!("--- {}\n\n", styles.outcome(outcome, text))
}

/// Indents every line of the given `message`, followed by a newline.
///
/// Empty if the `message` is.
fn indented(
    styles: &Styles,
    outcome: OutcomeCode,
    message: &str,
    indent: usize,
) -> String {
    if message.is_empty() {
        return String::new();
    }
    message
        .split('\n')
        .map(|line| {
            format!("{}{}\n", " ".repeat(indent), styles.outcome(outcome, line))
        })
        .collect()
}
