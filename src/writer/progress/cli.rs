//! CLI options of the [`Progress`] formatter.
//!
//! [`Progress`]: super::Progress

use std::path::PathBuf;

use smart_default::SmartDefault;

use crate::writer::out::Coloring;

/// CLI options of a [`Progress`] formatter.
///
/// [`Progress`]: super::Progress
#[derive(Clone, Debug, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Verbosity of an output.
    ///
    /// `-v` additionally outputs the errors a step error was caused by.
    #[arg(short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Coloring policy for a console output.
    #[arg(
        long,
        value_name = "auto|always|never",
        default_value = "auto",
        global = true
    )]
    #[default(Coloring::Auto)]
    pub color: Coloring,

    /// Don't output elapsed time and memory usage after the summary.
    #[arg(long)]
    pub no_timer: bool,

    /// Directory feature and step definition paths are shown relative to.
    ///
    /// Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub base_path: Option<PathBuf>,
}
