//! # Real-time Pacing
//!
//! Maps wall-clock time since `start` to a whole number of fixed steps. The
//! simulation runs steps until [`Pacer::steps`] catches up with
//! [`steps_due`], so the physical step size stays fixed whatever the frame
//! rate of the host.

use std::time::{Duration, Instant};

/// Clock origin and count of fixed steps taken since the last start.
#[derive(Clone, Debug, Default)]
pub struct Pacer {
    origin: Option<Instant>,
    frozen: Duration,
    steps: u64,
}

impl Pacer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the step counter and restart the clock from now.
    ///
    /// Returns `false`, changing nothing, if the clock is already running.
    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    /// [`Self::start`] with an explicit origin.
    pub fn start_at(&mut self, origin: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.origin = Some(origin);
        self.frozen = Duration::ZERO;
        self.steps = 0;
        true
    }

    /// Freeze the clock. The step count is kept for inspection.
    pub fn stop(&mut self) {
        if let Some(origin) = self.origin.take() {
            self.frozen = origin.elapsed();
        }
    }

    /// Forget everything, as if never started.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.origin.is_some()
    }

    #[must_use]
    pub fn origin(&self) -> Option<Instant> {
        self.origin
    }

    /// Wall-clock time since start; frozen at the moment of the last stop.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.origin.map_or(self.frozen, |origin| origin.elapsed())
    }

    /// Fixed steps taken since the last start.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn record_step(&mut self) {
        self.steps += 1;
    }
}

/// Whole steps of size `dt` that fit into `elapsed`.
#[must_use]
pub fn steps_due(elapsed: Duration, dt: f32) -> u64 {
    if dt <= 0.0 || !dt.is_finite() {
        return 0;
    }
    (elapsed.as_secs_f64() / f64::from(dt)).floor() as u64
}
