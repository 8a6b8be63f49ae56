//! # Clock Abstraction
//!
//! Everything time-dependent in Till (sale-ID generation, record timestamps,
//! summary windows) reads the current instant through the [`Clock`] trait
//! instead of calling `Utc::now()` directly. Production code injects
//! [`SystemClock`]; tests inject [`FixedClock`] and get deterministic sale
//! IDs and date windows.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a configurable instant, for tests.
///
/// ## Usage
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use till_core::clock::{Clock, FixedClock};
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 45).unwrap());
/// assert_eq!(clock.now().to_rfc3339(), "2026-01-15T10:30:45+00:00");
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        FixedClock {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock mutex poisoned") = now;
    }

    /// Advances the clock by a duration.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_is_frozen() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 45).unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn test_fixed_clock_advance() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 45).unwrap();
        let clock = FixedClock::new(instant);
        clock.advance(Duration::seconds(15));
        assert_eq!(
            clock.now(),
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 31, 0).unwrap()
        );
    }

    #[test]
    fn test_system_clock_is_utc_and_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
