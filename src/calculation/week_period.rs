//! Weekly period resolution.
//!
//! Checklist records are keyed by the Monday that starts the ISO week; a new
//! key every Monday is what resets the checklist gate each week.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::error::{EngineError, EngineResult};

/// Returns the Monday of the ISO week containing `now`, without a time component.
///
/// Fails for dates in the first days of the calendar range, whose Monday
/// cannot be represented.
///
/// # Example
///
/// ```
/// use fleet_commission::calculation::week_start;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// // 2026-01-15 is a Thursday
/// let now = NaiveDateTime::parse_from_str("2026-01-15 18:45:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(week_start(now).unwrap(), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// ```
pub fn week_start(now: NaiveDateTime) -> EngineResult<NaiveDate> {
    week_start_of(now.date())
}

/// Returns the Monday of the ISO week containing `date`.
pub fn week_start_of(date: NaiveDate) -> EngineResult<NaiveDate> {
    let offset = Duration::days(i64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_signed(offset)
        .ok_or_else(|| EngineError::InvalidRecord {
            field: "date".to_string(),
            message: format!("{} has no representable week start", date),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use proptest::prelude::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_monday_is_its_own_week_start() {
        let now = make_datetime("2026-01-12", "00:00:00");
        assert_eq!(week_start(now).unwrap(), make_date("2026-01-12"));
    }

    #[test]
    fn test_sunday_late_night_belongs_to_previous_monday() {
        let now = make_datetime("2026-01-18", "23:59:59");
        assert_eq!(week_start(now).unwrap(), make_date("2026-01-12"));
    }

    #[test]
    fn test_next_monday_starts_new_week() {
        let now = make_datetime("2026-01-19", "00:00:01");
        assert_eq!(week_start(now).unwrap(), make_date("2026-01-19"));
    }

    #[test]
    fn test_week_crossing_year_boundary() {
        // 2027-01-01 is a Friday; its ISO week starts on 2026-12-28
        let now = make_datetime("2027-01-01", "10:00:00");
        assert_eq!(week_start(now).unwrap(), make_date("2026-12-28"));
    }

    #[test]
    fn test_week_crossing_month_boundary() {
        assert_eq!(
            week_start_of(make_date("2026-03-01")).unwrap(),
            make_date("2026-02-23")
        );
    }

    #[test]
    fn test_earliest_date_is_rejected() {
        // NaiveDate::MIN is not a Monday, so its week would start before the range
        assert_ne!(NaiveDate::MIN.weekday(), Weekday::Mon);
        let result = week_start_of(NaiveDate::MIN);
        assert!(
            matches!(result, Err(EngineError::InvalidRecord { field, .. }) if field == "date")
        );
    }

    proptest! {
        #[test]
        fn prop_same_span_same_week_start(days in 0i64..3650, offset in 0i64..7, other in 0i64..7) {
            // 2024-01-01 is a Monday
            let base = make_date("2024-01-01") + Duration::days(days * 7);
            let a = base + Duration::days(offset);
            let b = base + Duration::days(other);
            prop_assert_eq!(week_start_of(a).unwrap(), week_start_of(b).unwrap());
            prop_assert_eq!(week_start_of(a).unwrap(), base);
        }

        #[test]
        fn prop_week_start_is_monday_within_six_days(days in 0i64..20000) {
            let date = make_date("1990-01-01") + Duration::days(days);
            let start = week_start_of(date).unwrap();
            prop_assert_eq!(start.weekday(), Weekday::Mon);
            prop_assert!(start <= date);
            prop_assert!((date - start).num_days() < 7);
        }
    }
}
