//! Read models returned by the service layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::ChecklistGate;
use crate::config::ChecklistTemplate;
use crate::models::{
    ChecklistPeriodRecord, CommissionMonth, CommissionRecord, CommissionResult, DayOfWeek,
    Delivery, Occurrence, TruckTotal, Worker,
};

/// Checklist state for the current week, as shown on a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistStatus {
    /// The worker's assigned weekday, if any.
    pub assigned_weekday: Option<DayOfWeek>,
    /// Gate decision for today.
    #[serde(flatten)]
    pub gate: ChecklistGate,
    /// Monday of the current week.
    pub week_start: NaiveDate,
    /// Whether this week's checklist is completed.
    pub completed: bool,
    /// Completion is owed and not yet done.
    pub checklist_pending: bool,
}

/// Everything a worker sees on their dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    /// The worker.
    pub worker: Worker,
    /// The month the figures refer to.
    pub month: CommissionMonth,
    /// Delivered value per truck category for the month.
    pub deliveries_by_truck: Vec<TruckTotal>,
    /// Total delivered value for the month.
    pub total_delivered_value: Decimal,
    /// Commission the worker would be paid if the month closed now.
    pub commission_preview: CommissionResult,
    /// This week's checklist state.
    pub checklist: ChecklistStatus,
}

/// The checklist template, optionally scoped to one worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistTemplateView {
    /// The configured template.
    pub template: ChecklistTemplate,
    /// The requesting worker's assigned weekday.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_weekday: Option<DayOfWeek>,
}

/// A worker's checklist for the current week together with today's gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentChecklist {
    /// The stored record for the week.
    pub record: ChecklistPeriodRecord,
    /// The worker's assigned weekday.
    pub assigned_weekday: DayOfWeek,
    /// Gate decision for today.
    #[serde(flatten)]
    pub gate: ChecklistGate,
}

/// Occurrences logged in a month, optionally narrowed to one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceLog {
    /// The month listed.
    pub month: CommissionMonth,
    /// The worker the listing is narrowed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    /// Number of occurrences listed.
    pub occurrence_count: usize,
    /// The occurrences, oldest first.
    pub occurrences: Vec<Occurrence>,
}

/// Posted commissions, newest first, with their summed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionHistory {
    /// The worker the history is narrowed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    /// The month the history is narrowed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<CommissionMonth>,
    /// Number of records listed.
    pub total_commissions: usize,
    /// Sum of the listed commission amounts.
    pub total_amount: Decimal,
    /// The records.
    pub commissions: Vec<CommissionRecord>,
}

/// Every delivery credited to a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryHistory {
    /// The worker.
    pub worker_id: String,
    /// Delivered value per truck category, across all months.
    pub deliveries_by_truck: Vec<TruckTotal>,
    /// Total delivered value across all months.
    pub total_delivered_value: Decimal,
    /// The deliveries, oldest first.
    pub deliveries: Vec<Delivery>,
}
