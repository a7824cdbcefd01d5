//! Occurrence records and the occurrence-count snapshot.
//!
//! Occurrences are only ever consumed in aggregate: the tier classifier sees
//! an [`OccurrenceCountSnapshot`], never the individual records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CommissionMonth;

/// The kind of incident an occurrence records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceCategory {
    /// Late delivery.
    Delay,
    /// Damaged goods or vehicle.
    Damage,
    /// Traffic or workplace accident.
    Accident,
    /// Anything else.
    Other,
}

/// A logged disciplinary or operational incident attributed to one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Unique identifier for the occurrence.
    pub id: String,
    /// The worker the occurrence is attributed to.
    pub worker_id: String,
    /// The kind of incident.
    pub category: OccurrenceCategory,
    /// Free-text description.
    pub description: String,
    /// When the occurrence was logged.
    pub recorded_at: DateTime<Utc>,
}

impl Occurrence {
    /// Returns the commission month this occurrence counts towards.
    pub fn month(&self) -> CommissionMonth {
        CommissionMonth::containing(self.recorded_at.date_naive())
    }
}

/// Occurrence counts per worker for a whole evaluation cohort.
///
/// Entries keep their insertion order, which is the "input order" used to
/// break ties when ranking. Recording the same worker twice replaces the
/// count in place without moving the entry.
///
/// # Example
///
/// ```
/// use fleet_commission::models::OccurrenceCountSnapshot;
///
/// let snapshot = OccurrenceCountSnapshot::from_counts([("ana", 3), ("bia", 0)]);
/// assert_eq!(snapshot.count_for("ana"), Some(3));
/// assert_eq!(snapshot.count_for("caio"), None);
/// assert_eq!(snapshot.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceCountSnapshot {
    entries: Vec<(String, u32)>,
}

impl OccurrenceCountSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from `(worker_id, count)` pairs in order.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut snapshot = Self::new();
        for (worker_id, count) in counts {
            snapshot.record(worker_id, count);
        }
        snapshot
    }

    /// Sets the count for a worker, appending the worker if it is new.
    pub fn record(&mut self, worker_id: impl Into<String>, count: u32) {
        let worker_id = worker_id.into();
        match self.entries.iter_mut().find(|(id, _)| *id == worker_id) {
            Some(entry) => entry.1 = count,
            None => self.entries.push((worker_id, count)),
        }
    }

    /// Adds one occurrence to a worker, appending the worker if it is new.
    pub fn increment(&mut self, worker_id: &str) {
        match self.entries.iter_mut().find(|(id, _)| id == worker_id) {
            Some(entry) => entry.1 += 1,
            None => self.entries.push((worker_id.to_string(), 1)),
        }
    }

    /// Returns the count for a worker, or `None` if the worker is absent.
    pub fn count_for(&self, worker_id: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(id, _)| id == worker_id)
            .map(|(_, count)| *count)
    }

    /// Returns the entries in insertion order.
    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    /// Returns the number of workers in the cohort.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cohort is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if nobody in the cohort has an occurrence.
    pub fn all_zero(&self) -> bool {
        self.entries.iter().all(|(_, count)| *count == 0)
    }

    /// Returns the sum of all counts.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, count)| *count).sum()
    }
}
