//! Worker model and related types.
//!
//! This module defines the [`Worker`] struct, the [`Role`] enum and the
//! [`DayOfWeek`] enum used for checklist assignments.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The role a worker holds in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Drives a truck; may owe a weekly vehicle checklist.
    Driver,
    /// Rides along with a driver; never owes a checklist.
    Helper,
    /// Back-office user; not part of the commission cohort.
    Admin,
}

impl Role {
    /// Returns true for roles that take part in commission tiering.
    pub fn earns_commission(self) -> bool {
        matches!(self, Role::Driver | Role::Helper)
    }

    /// Returns the lowercase label used in JSON and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Driver => "driver",
            Role::Helper => "helper",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A day of the week, ordered Monday (0) through Sunday (6).
///
/// # Example
///
/// ```
/// use fleet_commission::models::DayOfWeek;
///
/// let day: DayOfWeek = " wednesday ".parse().unwrap();
/// assert_eq!(day, DayOfWeek::Wednesday);
/// assert_eq!(day.ordinal(), 2);
/// assert_eq!(day.to_string(), "Wednesday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayOfWeek {
    /// All days in week order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Returns the 0-based position of the day, Monday being 0.
    pub fn ordinal(self) -> u32 {
        match self {
            DayOfWeek::Monday => 0,
            DayOfWeek::Tuesday => 1,
            DayOfWeek::Wednesday => 2,
            DayOfWeek::Thursday => 3,
            DayOfWeek::Friday => 4,
            DayOfWeek::Saturday => 5,
            DayOfWeek::Sunday => 6,
        }
    }

    /// Returns the day a calendar date falls on.
    pub fn of_date(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    /// Returns the English name of the day.
    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        Self::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a weekday name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDayOfWeekError(pub String);

impl fmt::Display for ParseDayOfWeekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown weekday: {}", self.0)
    }
}

impl std::error::Error for ParseDayOfWeekError {}

impl FromStr for DayOfWeek {
    type Err = ParseDayOfWeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseDayOfWeekError(s.to_string()))
    }
}

/// A driver, helper or admin known to the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Opaque unique identifier.
    pub id: String,
    /// Display name; also the key for rate band and weekday lookups.
    pub name: String,
    /// The worker's role.
    pub role: Role,
    /// The weekday this driver owes the vehicle checklist, if any.
    #[serde(default)]
    pub assigned_weekday: Option<DayOfWeek>,
}

impl Worker {
    /// Returns true if the worker is a driver.
    pub fn is_driver(&self) -> bool {
        self.role == Role::Driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_run_monday_to_sunday() {
        let ordinals: Vec<u32> = DayOfWeek::ALL.iter().map(|d| d.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_of_date_matches_calendar() {
        // 2026-01-15 is a Thursday
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(DayOfWeek::of_date(date), DayOfWeek::Thursday);
        // 2026-01-18 is a Sunday
        let date = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
        assert_eq!(DayOfWeek::of_date(date), DayOfWeek::Sunday);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!("MONDAY".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("  friday\n".parse::<DayOfWeek>().unwrap(), DayOfWeek::Friday);
        assert!("Funday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn test_day_serializes_as_full_name() {
        let json = serde_json::to_string(&DayOfWeek::Thursday).unwrap();
        assert_eq!(json, "\"Thursday\"");
    }

    #[test]
    fn test_role_eligibility() {
        assert!(Role::Driver.earns_commission());
        assert!(Role::Helper.earns_commission());
        assert!(!Role::Admin.earns_commission());
    }

    #[test]
    fn test_deserialize_worker_without_weekday() {
        let json = r#"{
            "id": "w-1",
            "name": "Ana",
            "role": "helper"
        }"#;
        let worker: Worker = serde_json::from_str(json).unwrap();
        assert_eq!(worker.role, Role::Helper);
        assert_eq!(worker.assigned_weekday, None);
        assert!(!worker.is_driver());
    }

    #[test]
    fn test_deserialize_driver_with_weekday() {
        let json = r#"{
            "id": "w-2",
            "name": "Davi",
            "role": "driver",
            "assigned_weekday": "Monday"
        }"#;
        let worker: Worker = serde_json::from_str(json).unwrap();
        assert!(worker.is_driver());
        assert_eq!(worker.assigned_weekday, Some(DayOfWeek::Monday));
    }
}
