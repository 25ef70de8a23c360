//! Memory consumption of a run.

use std::{fmt, fs};

/// Samples memory usage, rendered via [`fmt::Display`].
pub trait MemoryUsage: fmt::Debug + fmt::Display {}

/// Peak resident set size of the current process.
///
/// Displayed in MiB with two decimals, or as `n/a` when the platform doesn't
/// expose it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PeakMemory;

impl PeakMemory {
    /// Samples the peak resident set size in bytes.
    #[must_use]
    pub fn sample(self) -> Option<u64> {
        fs::read_to_string("/proc/self/status")
            .ok()
            .as_deref()
            .and_then(parse_vm_hwm)
    }
}

impl MemoryUsage for PeakMemory {}

impl fmt::Display for PeakMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sample() {
            Some(bytes) => write!(f, "{}", format_mib(bytes)),
            None => f.write_str("n/a"),
        }
    }
}

/// Extracts the `VmHWM` value of a `/proc/<pid>/status` file, in bytes.
fn parse_vm_hwm(status: &str) -> Option<u64> {
    let line = status.lines().find(|l| l.starts_with("VmHWM:"))?;
    let mut parts = line["VmHWM:".len()..].split_whitespace();
    let value = parts.next()?.parse::<u64>().ok()?;
    match parts.next() {
        Some("kB") | None => Some(value.saturating_mul(1024)),
        Some(_) => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_mib(bytes: u64) -> String {
    format!("{:.2} MiB", bytes as f64 / (1024.0 * 1024.0))
}
