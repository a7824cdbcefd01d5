//! Core data models for the fleet commission engine.
//!
//! This module contains all the domain models used throughout the engine.

mod checklist;
mod commission_month;
mod commission_result;
mod delivery;
mod occurrence;
mod worker;

pub use checklist::{ChecklistAnswers, ChecklistPeriodRecord};
pub use commission_month::CommissionMonth;
pub use commission_result::{
    AuditStep, CommissionBreakdown, CommissionRecord, CommissionResult, CommissionStatistics,
    OccurrenceTier, TierDistribution,
};
pub use delivery::{Delivery, TruckTotal, total_delivered_value, totals_by_truck};
pub use occurrence::{Occurrence, OccurrenceCategory, OccurrenceCountSnapshot};
pub use worker::{DayOfWeek, ParseDayOfWeekError, Role, Worker};
