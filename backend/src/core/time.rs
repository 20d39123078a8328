//! Time source for the simulator
//!
//! Queued events are stamped with wall-clock time when they enter the queue.
//! The clock sits behind a trait so tests can drive it deterministically.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of enqueue timestamps
pub trait Clock {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time (`Utc::now`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for deterministic runs
///
/// Clones share the same instant, so a test can keep one copy and hand the
/// other to a queue.
///
/// # Example
/// ```
/// use event_simulator_core_rs::core::time::{Clock, ManualClock};
/// use chrono::{Duration, TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
/// let clock = ManualClock::new(start);
/// assert_eq!(clock.now(), start);
///
/// clock.advance(Duration::seconds(5));
/// assert_eq!(clock.now(), start + Duration::seconds(5));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Rc::new(Cell::new(start)),
        }
    }

    /// Move the clock forward by `step`
    ///
    /// # Panics
    /// Panics if `step` is negative; enqueue timestamps never go backwards.
    pub fn advance(&self, step: Duration) {
        assert!(step >= Duration::zero(), "clock step must not be negative");
        self.current.set(self.current.get() + step);
    }

    /// Jump to an absolute instant (must not be earlier than now)
    pub fn set(&self, instant: DateTime<Utc>) {
        assert!(
            instant >= self.current.get(),
            "clock must not move backwards"
        );
        self.current.set(instant);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    #[should_panic(expected = "clock step must not be negative")]
    fn test_negative_step_panics() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        clock.advance(Duration::seconds(-1));
    }

    #[test]
    fn test_clones_share_time() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let other = clock.clone();
        clock.advance(Duration::minutes(1));
        assert_eq!(other.now(), clock.now());
    }
}
