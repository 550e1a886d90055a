//! Time and timestamp helpers.

use chrono::{DateTime, Datelike, Duration, Utc};

/// UTC timestamp used for `date_added` and query cut-offs.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the instant `days` whole days before `reference`, saturating at
/// the earliest representable time.
#[must_use]
pub fn days_before(reference: Timestamp, days: u32) -> Timestamp {
    reference
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Whether `ts` falls in years 0000 through 9999, the range that renders as
/// fixed-width RFC 3339 text.
#[must_use]
pub fn is_four_digit_year(ts: Timestamp) -> bool {
    (0..=9999).contains(&ts.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_subtract_whole_days() {
        let reference: Timestamp = "2024-03-10T12:00:00Z".parse().unwrap();
        let cutoff = days_before(reference, 3);
        assert_eq!(cutoff.to_rfc3339(), "2024-03-07T12:00:00+00:00");
    }

    #[test]
    fn should_saturate_instead_of_overflowing() {
        assert_eq!(days_before(now(), u32::MAX), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn should_accept_only_four_digit_years() {
        let year_zero = Utc.with_ymd_and_hms(0, 1, 1, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        assert!(is_four_digit_year(year_zero));
        assert!(is_four_digit_year(last));
        assert!(!is_four_digit_year(last + Duration::seconds(1)));
        assert!(!is_four_digit_year(year_zero - Duration::seconds(1)));
    }

    #[test]
    fn should_return_reference_when_zero_days() {
        let reference = now();
        assert_eq!(days_before(reference, 0), reference);
    }
}
