//! Repeating timer and clock sources.
//!
//! Nothing here spawns threads. The owner of an [`Interval`] polls it with
//! the current instant and fires one tick per successful poll.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shortest period an interval accepts.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    /// Start a timer whose first firing is one period after `now`.
    #[must_use]
    pub fn start(period: Duration, now: Instant) -> Self {
        let period = period.max(MIN_PERIOD);
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Time between firings.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Instant of the next firing.
    #[must_use]
    pub const fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Consume one firing if it is due at `now`.
    ///
    /// Firings missed while nobody polled are dropped; the next one stays
    /// on the original cadence, strictly after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            let behind = (now - self.next_due).as_nanos() % self.period.as_nanos();
            let into_period = u64::try_from(behind).map_or(Duration::ZERO, Duration::from_nanos);
            self.next_due = now + (self.period - into_period);
        }
        true
    }
}

/// Source of the current instant.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_once_per_period() {
        let start = Instant::now();
        let mut timer = Interval::start(Duration::from_millis(1000), start);

        assert!(!timer.poll(start));
        assert!(!timer.poll(start + Duration::from_millis(999)));
        assert!(timer.poll(start + Duration::from_millis(1000)));
        assert!(!timer.poll(start + Duration::from_millis(1500)));
    }

    #[test]
    fn test_interval_drops_missed_periods() {
        let start = Instant::now();
        let mut timer = Interval::start(Duration::from_millis(100), start);
        let later = start + Duration::from_millis(350);

        assert!(timer.poll(later));
        assert!(!timer.poll(later));
        assert_eq!(timer.next_due(), start + Duration::from_millis(400));
    }

    #[test]
    fn test_interval_poll_on_period_boundary() {
        let start = Instant::now();
        let mut timer = Interval::start(Duration::from_millis(100), start);
        let later = start + Duration::from_millis(300);

        assert!(timer.poll(later));
        assert_eq!(timer.next_due(), start + Duration::from_millis(400));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let timer = Interval::start(Duration::ZERO, Instant::now());
        assert_eq!(timer.period(), MIN_PERIOD);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let before = other.now();

        clock.advance(Duration::from_secs(2));
        assert_eq!(other.now() - before, Duration::from_secs(2));
    }
}
