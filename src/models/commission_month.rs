//! Commission month model.
//!
//! Occurrences and commissions are grouped by the calendar month of their
//! timestamp. This module contains the [`CommissionMonth`] type that keys
//! those groups.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month used to group occurrences and posted commissions.
///
/// # Example
///
/// ```
/// use fleet_commission::models::CommissionMonth;
/// use chrono::NaiveDate;
///
/// let month = CommissionMonth::containing(NaiveDate::from_ymd_opt(2026, 2, 17).unwrap());
/// assert_eq!(month, CommissionMonth { year: 2026, month: 2 });
/// assert!(month.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
/// assert!(!month.contains_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommissionMonth {
    /// The calendar year.
    pub year: i32,
    /// The month number, 1 through 12.
    pub month: u32,
}

impl CommissionMonth {
    /// Returns the month a date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Checks if a given date falls within this month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns true when `month` is within 1..=12.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
    }
}

impl fmt::Display for CommissionMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_uses_calendar_month() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(
            CommissionMonth::containing(date),
            CommissionMonth {
                year: 2026,
                month: 12
            }
        );
    }

    #[test]
    fn test_contains_date_rejects_same_month_other_year() {
        let month = CommissionMonth {
            year: 2026,
            month: 1,
        };
        assert!(!month.contains_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()));
    }

    #[test]
    fn test_is_valid_bounds() {
        assert!(CommissionMonth { year: 2026, month: 1 }.is_valid());
        assert!(CommissionMonth { year: 2026, month: 12 }.is_valid());
        assert!(!CommissionMonth { year: 2026, month: 0 }.is_valid());
        assert!(!CommissionMonth { year: 2026, month: 13 }.is_valid());
    }

    #[test]
    fn test_display_is_zero_padded() {
        let month = CommissionMonth {
            year: 2026,
            month: 2,
        };
        assert_eq!(month.to_string(), "2026-02");
    }

    #[test]
    fn test_deserialize_commission_month() {
        let json = r#"{ "year": 2026, "month": 2 }"#;
        let month: CommissionMonth = serde_json::from_str(json).unwrap();
        assert_eq!(month.year, 2026);
        assert_eq!(month.month, 2);
    }
}
