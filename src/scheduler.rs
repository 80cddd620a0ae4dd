use std::time::{Duration, Instant};

use crate::config::MIN_TICK_INTERVAL_MS;

/// Fixed-cadence tick timer for a single-threaded game loop.
///
/// The scheduler never calls into the engine itself. The loop asks
/// [`TickScheduler::poll`] whether a tick is due and advances the engine when
/// it says so, which keeps input handling and ticks strictly interleaved.
/// Stopping clears the pending deadline, so no tick can fire until the next
/// [`TickScheduler::start`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    /// Creates a stopped scheduler.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: clamp_interval(interval),
            next_due: None,
        }
    }

    /// Arms the scheduler; the first tick falls one interval after `now`.
    /// Replaces any previously pending deadline.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.interval = clamp_interval(interval);
        self.next_due = Some(now + self.interval);
    }

    /// Disarms the scheduler. Calling it again is harmless.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` at most once per deadline when a tick is due at `now`.
    ///
    /// A loop that fell several intervals behind gets one tick, and the next
    /// deadline is measured from `now` instead of replaying the missed ones.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let next = due + self.interval;
        self.next_due = Some(if next > now { next } else { now + self.interval });
        true
    }

    /// Time left until the next tick, `None` while stopped.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

fn clamp_interval(interval: Duration) -> Duration {
    interval.max(Duration::from_millis(MIN_TICK_INTERVAL_MS))
}
