//! Request types for the fleet commission API.
//!
//! This module defines the JSON request bodies and query strings accepted
//! by the HTTP endpoints.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ChecklistAnswers, CommissionMonth, OccurrenceCategory, Role};

/// Request body for `POST /workers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterWorkerRequest {
    /// The worker's display name; also the key for bands and assignments.
    pub name: String,
    /// The worker's role.
    pub role: Role,
}

/// Request body for `POST /occurrences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogOccurrenceRequest {
    /// The worker the occurrence is attributed to.
    pub worker_id: String,
    /// The kind of incident.
    pub category: OccurrenceCategory,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// When the occurrence happened; defaults to the request time.
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /deliveries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDeliveryRequest {
    /// The worker credited with the delivery.
    pub worker_id: String,
    /// The truck category code.
    pub truck_category: String,
    /// The delivered value.
    pub value: Decimal,
    /// When the delivery happened; defaults to the request time.
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /commission/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRequest {
    /// The worker to calculate for.
    pub worker_id: String,
    /// Month number, 1 through 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

impl CommissionRequest {
    /// Returns the requested commission month.
    pub fn commission_month(&self) -> CommissionMonth {
        CommissionMonth {
            year: self.year,
            month: self.month,
        }
    }
}

/// Request body for `POST /commission/post`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCommissionRequest {
    /// The worker and month to post.
    #[serde(flatten)]
    pub commission: CommissionRequest,
    /// Optional free-text notes stored with the record.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Required `month` and `year` query parameters.
///
/// Used by `GET /commission/statistics` and the occurrence listings.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthQuery {
    /// Month number, 1 through 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

impl MonthQuery {
    /// Returns the requested commission month.
    pub fn commission_month(&self) -> CommissionMonth {
        CommissionMonth {
            year: self.year,
            month: self.month,
        }
    }
}

/// Optional `month` and `year` filter for the commission history listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Month number, 1 through 12.
    #[serde(default)]
    pub month: Option<u32>,
    /// Calendar year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl HistoryQuery {
    /// Returns the month filter; `month` and `year` must come together.
    pub fn commission_month(&self) -> EngineResult<Option<CommissionMonth>> {
        match (self.month, self.year) {
            (Some(month), Some(year)) => Ok(Some(CommissionMonth { year, month })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(EngineError::InvalidRecord {
                field: "year".to_string(),
                message: "must be given together with month".to_string(),
            }),
            (None, Some(_)) => Err(EngineError::InvalidRecord {
                field: "month".to_string(),
                message: "must be given together with year".to_string(),
            }),
        }
    }
}

/// Optional `at` override for the current time (`YYYY-MM-DDTHH:MM:SS`, UTC).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtQuery {
    /// The instant to evaluate at instead of the wall clock.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

impl AtQuery {
    /// Returns the requested instant, or the wall clock when none was given.
    pub fn resolve(&self) -> DateTime<Utc> {
        self.at.map(|at| at.and_utc()).unwrap_or_else(Utc::now)
    }
}

/// Query string for `GET /checklist/template`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateQuery {
    /// Scope the template to this worker.
    #[serde(default)]
    pub worker_id: Option<String>,
}

/// Request body for `POST /workers/:id/checklist`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitChecklistRequest {
    /// Answers keyed by category, then by item.
    pub items: ChecklistAnswers,
}
