//! Weekly vehicle checklist records.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Answers keyed by category, then by item.
pub type ChecklistAnswers = BTreeMap<String, BTreeMap<String, String>>;

/// One driver's checklist for one week.
///
/// Keyed by `(worker_id, week_start)`. A record starts incomplete with no
/// answers; the only transition is to `completed = true`, which never reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistPeriodRecord {
    /// The driver the record belongs to.
    pub worker_id: String,
    /// The Monday that starts the week.
    pub week_start: NaiveDate,
    /// Whether the checklist was submitted for this week.
    pub completed: bool,
    /// The submitted answers; empty until completion.
    #[serde(default)]
    pub items: ChecklistAnswers,
    /// When the checklist was completed.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ChecklistPeriodRecord {
    /// Creates a fresh, empty, incomplete record.
    pub fn new(worker_id: impl Into<String>, week_start: NaiveDate) -> Self {
        Self {
            worker_id: worker_id.into(),
            week_start,
            completed: false,
            items: ChecklistAnswers::new(),
            completed_at: None,
        }
    }

    /// Returns true if the record belongs to the given key.
    pub fn matches(&self, worker_id: &str, week_start: NaiveDate) -> bool {
        self.worker_id == worker_id && self.week_start == week_start
    }
}
