//! Frame timing

use instant::Instant;
use std::time::Duration;

/// Tracks elapsed time since `start` and the delta between calls.
///
/// Elapsed time is measured from the start instant rather than summed from
/// frame deltas, so it keeps full precision over long runs. A clock that was
/// never started starts itself on first use.
#[derive(Debug, Clone)]
pub struct Clock {
    start_time: Option<Instant>,
    old_time: Option<Instant>,
    elapsed: Duration,
    running: bool,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start_time: None,
            old_time: None,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    /// Start (or restart) timing from now
    pub fn start(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.old_time = Some(now);
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    /// Freeze the elapsed time
    pub fn stop(&mut self) {
        self.elapsed_time();
        self.running = false;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Seconds since the clock started
    pub fn elapsed_time(&mut self) -> f64 {
        self.delta();
        self.elapsed.as_secs_f64()
    }

    /// Seconds since the previous call to `delta` or `elapsed_time`
    pub fn delta(&mut self) -> f32 {
        self.advance(Instant::now())
    }

    fn advance(&mut self, now: Instant) -> f32 {
        let Some(start) = self.start_time else {
            self.start();
            return 0.0;
        };
        if !self.running {
            return 0.0;
        }

        let diff = self
            .old_time
            .map(|old| now.saturating_duration_since(old).as_secs_f32())
            .unwrap_or(0.0);
        self.old_time = Some(now);
        self.elapsed = now.saturating_duration_since(start);
        diff
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
