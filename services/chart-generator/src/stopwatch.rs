//! Elapsed-time tracking for a CLI run.

use std::time::{Duration, Instant};

/// Records the start of a run and any intermediate marks.
pub struct Stopwatch {
    marks: Vec<Instant>,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            marks: vec![Instant::now()],
        }
    }

    pub fn mark(&mut self) {
        self.marks.push(Instant::now());
    }

    /// Time between the two most recent marks.
    pub fn last_lap(&self) -> Duration {
        match self.marks.as_slice() {
            [.., previous, last] => last.duration_since(*previous),
            _ => Duration::ZERO,
        }
    }

    /// Time since the stopwatch started.
    pub fn total(&self) -> Duration {
        self.marks[0].elapsed()
    }
}

/// `1 hour, 2 minutes, 3.50 seconds`; the hour part only when non-zero.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    let hours = (secs / 3600.0).floor() as u64;
    let minutes = ((secs - hours as f64 * 3600.0) / 60.0).floor() as u64;
    let seconds = secs - hours as f64 * 3600.0 - minutes as f64 * 60.0;

    let plural = |n: u64| if n == 1 { "" } else { "s" };
    let mut result = format!("{} minute{}, {:.2} seconds", minutes, plural(minutes), seconds);
    if hours > 0 {
        result = format!("{} hour{}, {}", hours, plural(hours), result);
    }
    result
}
