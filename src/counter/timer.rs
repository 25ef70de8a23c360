//! Wall time of a run.

use std::{
    fmt,
    time::{Duration, Instant},
};

/// Measures elapsed wall time, rendered via [`fmt::Display`].
pub trait Timer: fmt::Debug + fmt::Display {
    /// (Re)starts measuring.
    fn start(&mut self);

    /// Stops measuring, freezing the elapsed time.
    fn stop(&mut self);
}

/// [`Timer`] backed by [`Instant`].
///
/// Displayed with millisecond precision, like `1s 234ms`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    elapsed: Option<Duration>,
}

impl Stopwatch {
    /// Creates a new, not yet started [`Stopwatch`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            started: None,
            elapsed: None,
        }
    }

    /// Time elapsed since the last start: frozen once stopped, running
    /// otherwise.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
            .or_else(|| self.started.map(|s| s.elapsed()))
            .unwrap_or_default()
    }
}

impl Timer for Stopwatch {
    fn start(&mut self) {
        self.started = Some(Instant::now());
        self.elapsed = None;
    }

    fn stop(&mut self) {
        if let Some(started) = self.started {
            self.elapsed = Some(started.elapsed());
        }
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX);
        write!(f, "{}", humantime::format_duration(Duration::from_millis(millis)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_started_is_zero() {
        let timer = Stopwatch::new();

        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert_eq!(timer.to_string(), "0s");
    }

    #[test]
    fn stop_freezes_elapsed_time() {
        let mut timer = Stopwatch::new();
        timer.start();
        timer.stop();
        let frozen = timer.elapsed();

        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(timer.elapsed(), frozen);
    }

    #[test]
    fn displays_milliseconds() {
        let timer = Stopwatch {
            started: None,
            elapsed: Some(Duration::from_micros(1_234_567)),
        };

        assert_eq!(timer.to_string(), "1s 234ms");
    }
}
