//! # Sale ID Generation
//!
//! Business identifiers for sales: `SALE-` followed by the creation instant
//! formatted as `YYYYMMDDHHMMSS` (UTC, zero-padded, no separators).
//!
//! ## The Same-Second Race
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Request A at 10:30:45 ──► SALE-20260115103045                          │
//! │  Request B at 10:30:45 ──► SALE-20260115103045   ← COLLISION            │
//! │                                                                         │
//! │  Second-level resolution guarantees collisions under concurrent        │
//! │  creation. The database enforces UNIQUE(sale_id); the service catches  │
//! │  the violation and retries with an entropy-suffixed ID:                │
//! │                                                                         │
//! │  Retry B           ──► SALE-20260115103045-4821                         │
//! │                                                                         │
//! │  Uniqueness lives in the storage layer, never in application locks.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::clock::Clock;

/// Prefix shared by every sale business identifier.
pub const SALE_ID_PREFIX: &str = "SALE-";

/// Timestamp layout inside a sale ID: year, month, day, hour, minute,
/// second, zero-padded, no separators.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Generates the first-attempt sale ID for the clock's current second.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use till_core::clock::FixedClock;
/// use till_core::sale_id::generate;
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 45).unwrap());
/// assert_eq!(generate(&clock), "SALE-20260115103045");
/// ```
pub fn generate(clock: &dyn Clock) -> String {
    format!(
        "{}{}",
        SALE_ID_PREFIX,
        clock.now().format(TIMESTAMP_FORMAT)
    )
}

/// Generates a retry sale ID with a 4-digit entropy suffix.
///
/// Called after a `UNIQUE(sale_id)` violation. The suffix mixes the wall
/// clock's subsecond nanoseconds with the attempt number so two retries in
/// the same second diverge even under a frozen test clock.
pub fn regenerate(clock: &dyn Clock, attempt: u32) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let suffix = (nanos.wrapping_add(attempt.wrapping_mul(7919))) % 10000;
    format!(
        "{}{}-{:04}",
        SALE_ID_PREFIX,
        clock.now().format(TIMESTAMP_FORMAT),
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn test_clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 45).unwrap())
    }

    #[test]
    fn test_generate_format() {
        let clock = test_clock();
        assert_eq!(generate(&clock), "SALE-20260115103045");
    }

    #[test]
    fn test_generate_zero_pads() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap());
        assert_eq!(generate(&clock), "SALE-20260203040506");
    }

    #[test]
    fn test_regenerate_keeps_timestamp_and_adds_suffix() {
        let clock = test_clock();
        let id = regenerate(&clock, 1);
        assert!(id.starts_with("SALE-20260115103045-"));
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_regenerate_differs_from_first_attempt() {
        let clock = test_clock();
        assert_ne!(generate(&clock), regenerate(&clock, 1));
    }
}
