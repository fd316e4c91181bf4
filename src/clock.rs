//! Clock
//!
//! Wall-clock arithmetic shared by the listing computations. Nothing in here reads the
//! system clock; callers always pass `now` explicitly.

use jiff::{SignedDuration, Timestamp};

/// Number of seconds in a day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days elapsed between `from` and `now`.
///
/// This is floor division of the wall-clock difference in seconds, not a calendar date
/// subtraction: 14 days and 1 second is 14 days, and a `from` in the future yields a
/// negative count.
pub fn days_since(from: Timestamp, now: Timestamp) -> i64 {
    now.duration_since(from)
        .as_secs()
        .div_euclid(SECONDS_PER_DAY)
}

/// Whether more than `days` whole days have passed since `from`.
///
/// Exactly `days` days (to the second) is not "more than".
pub fn is_older_than(from: Timestamp, now: Timestamp, days: i64) -> bool {
    now.duration_since(from) > SignedDuration::from_secs(days.saturating_mul(SECONDS_PER_DAY))
}

/// `now` moved forward by a number of days, saturating at the maximum timestamp.
pub fn days_after(now: Timestamp, days: i64) -> Timestamp {
    now.checked_add(SignedDuration::from_secs(
        days.saturating_mul(SECONDS_PER_DAY),
    ))
    .unwrap_or(Timestamp::MAX)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn at(s: &str) -> Result<Timestamp, jiff::Error> {
        s.parse()
    }

    #[test]
    fn days_since_floors_partial_days() -> TestResult {
        let published = at("2025-03-01T12:00:00Z")?;

        assert_eq!(days_since(published, at("2025-03-15T11:59:59Z")?), 13);
        assert_eq!(days_since(published, at("2025-03-15T12:00:00Z")?), 14);
        assert_eq!(days_since(published, at("2025-03-15T12:00:01Z")?), 14);
        assert_eq!(days_since(published, at("2025-03-16T12:00:00Z")?), 15);

        Ok(())
    }

    #[test]
    fn days_since_is_negative_for_future_timestamps() -> TestResult {
        let published = at("2025-03-02T00:00:00Z")?;

        assert_eq!(days_since(published, at("2025-03-01T23:00:00Z")?), -1);

        Ok(())
    }

    #[test]
    fn older_than_is_strict_to_the_second() -> TestResult {
        let published = at("2025-03-01T12:00:00Z")?;

        assert!(!is_older_than(published, at("2025-03-15T12:00:00Z")?, 14));
        assert!(is_older_than(published, at("2025-03-15T12:00:01Z")?, 14));

        Ok(())
    }

    #[test]
    fn days_after_adds_whole_days() -> TestResult {
        let now = at("2025-03-01T08:30:00Z")?;

        assert_eq!(days_after(now, 7), at("2025-03-08T08:30:00Z")?);

        Ok(())
    }

    #[test]
    fn days_after_saturates() {
        assert_eq!(days_after(Timestamp::MAX, 7), Timestamp::MAX);
    }
}
