//! Weekly checklist gating.
//!
//! A driver with an assigned weekday may fill the vehicle checklist on that
//! day or any later day of the same week, and owes it from that day on.
//! Nobody else ever fills or owes one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DayOfWeek, Role, Worker};

/// Whether a checklist may be filled, and whether it is owed, on a given day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistGate {
    /// A submission would be accepted today.
    pub can_fill: bool,
    /// Completion is owed for the current week.
    pub should_complete: bool,
}

/// Decides the checklist gate for a worker on a given day.
///
/// Depends only on the role, the assigned weekday and the weekday of `today`.
///
/// # Example
///
/// ```
/// use fleet_commission::calculation::checklist_gate;
/// use fleet_commission::models::{DayOfWeek, Role};
/// use chrono::NaiveDate;
///
/// // 2026-01-13 is a Tuesday, 2026-01-16 a Friday
/// let tuesday = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let friday = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
///
/// let gate = checklist_gate(Role::Driver, Some(DayOfWeek::Wednesday), tuesday);
/// assert!(!gate.can_fill && !gate.should_complete);
///
/// let gate = checklist_gate(Role::Driver, Some(DayOfWeek::Wednesday), friday);
/// assert!(gate.can_fill && gate.should_complete);
/// ```
pub fn checklist_gate(
    role: Role,
    assigned_weekday: Option<DayOfWeek>,
    today: NaiveDate,
) -> ChecklistGate {
    match (role, assigned_weekday) {
        (Role::Driver, Some(assigned)) => gate_for_day(assigned, DayOfWeek::of_date(today)),
        _ => ChecklistGate::default(),
    }
}

/// Decides the checklist gate for an assigned driver from two weekdays.
pub fn gate_for_day(assigned: DayOfWeek, today: DayOfWeek) -> ChecklistGate {
    let reached = today.ordinal() >= assigned.ordinal();
    ChecklistGate {
        can_fill: reached,
        should_complete: reached,
    }
}

/// Checks that a worker may submit a checklist today.
///
/// Non-drivers and drivers without an assigned weekday are rejected with
/// [`EngineError::ChecklistNotAssigned`]; drivers before their assigned day
/// with [`EngineError::ChecklistWindowClosed`].
pub fn authorize_submission(worker: &Worker, today: NaiveDate) -> EngineResult<DayOfWeek> {
    let assigned = assigned_day(worker)?;
    if !gate_for_day(assigned, DayOfWeek::of_date(today)).can_fill {
        return Err(EngineError::ChecklistWindowClosed {
            assigned_day: assigned,
        });
    }
    Ok(assigned)
}

/// Returns the worker's assigned weekday, rejecting workers without a checklist.
pub fn assigned_day(worker: &Worker) -> EngineResult<DayOfWeek> {
    match (worker.role, worker.assigned_weekday) {
        (Role::Driver, Some(day)) => Ok(day),
        _ => Err(EngineError::ChecklistNotAssigned {
            worker_id: worker.id.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2026-01-12 is a Monday
    fn date_for(day: DayOfWeek) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 12 + day.ordinal()).unwrap()
    }

    fn driver(assigned: Option<DayOfWeek>) -> Worker {
        Worker {
            id: "w-1".to_string(),
            name: "Claudio".to_string(),
            role: Role::Driver,
            assigned_weekday: assigned,
        }
    }

    #[test]
    fn test_wednesday_driver_over_the_week() {
        for day in DayOfWeek::ALL {
            let gate = checklist_gate(Role::Driver, Some(DayOfWeek::Wednesday), date_for(day));
            let expected = day.ordinal() >= 2;
            assert_eq!(gate.can_fill, expected, "can_fill on {}", day);
            assert_eq!(gate.should_complete, expected, "should_complete on {}", day);
        }
    }

    #[test]
    fn test_monday_driver_always_open() {
        for day in DayOfWeek::ALL {
            let gate = checklist_gate(Role::Driver, Some(DayOfWeek::Monday), date_for(day));
            assert!(gate.can_fill);
            assert!(gate.should_complete);
        }
    }

    #[test]
    fn test_sunday_driver_only_on_sunday() {
        let saturday = checklist_gate(
            Role::Driver,
            Some(DayOfWeek::Sunday),
            date_for(DayOfWeek::Saturday),
        );
        assert!(!saturday.can_fill);
        let sunday = checklist_gate(
            Role::Driver,
            Some(DayOfWeek::Sunday),
            date_for(DayOfWeek::Sunday),
        );
        assert!(sunday.can_fill);
    }

    #[test]
    fn test_helper_and_admin_never_gated_in() {
        for role in [Role::Helper, Role::Admin] {
            for day in DayOfWeek::ALL {
                let gate = checklist_gate(role, Some(DayOfWeek::Monday), date_for(day));
                assert_eq!(gate, ChecklistGate::default());
            }
        }
    }

    #[test]
    fn test_unassigned_driver_closed() {
        let gate = checklist_gate(Role::Driver, None, date_for(DayOfWeek::Sunday));
        assert!(!gate.can_fill);
        assert!(!gate.should_complete);
    }

    #[test]
    fn test_gate_depends_only_on_weekday() {
        let week_one = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let week_nine = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap();
        assert_eq!(
            checklist_gate(Role::Driver, Some(DayOfWeek::Thursday), week_one),
            checklist_gate(Role::Driver, Some(DayOfWeek::Thursday), week_nine)
        );
    }

    #[test]
    fn test_authorize_before_assigned_day_is_window_closed() {
        let worker = driver(Some(DayOfWeek::Thursday));
        match authorize_submission(&worker, date_for(DayOfWeek::Tuesday)) {
            Err(EngineError::ChecklistWindowClosed { assigned_day }) => {
                assert_eq!(assigned_day, DayOfWeek::Thursday);
            }
            other => panic!("Expected ChecklistWindowClosed, got {:?}", other),
        }
    }

    #[test]
    fn test_authorize_catch_up_day_is_allowed() {
        let worker = driver(Some(DayOfWeek::Thursday));
        let result = authorize_submission(&worker, date_for(DayOfWeek::Saturday));
        assert_eq!(result.unwrap(), DayOfWeek::Thursday);
    }

    #[test]
    fn test_authorize_unassigned_is_not_assigned() {
        let worker = driver(None);
        assert!(matches!(
            authorize_submission(&worker, date_for(DayOfWeek::Friday)),
            Err(EngineError::ChecklistNotAssigned { .. })
        ));
    }

    #[test]
    fn test_authorize_helper_is_not_assigned_even_with_weekday() {
        let mut worker = driver(Some(DayOfWeek::Monday));
        worker.role = Role::Helper;
        assert!(matches!(
            authorize_submission(&worker, date_for(DayOfWeek::Friday)),
            Err(EngineError::ChecklistNotAssigned { .. })
        ));
    }
}
