//! Record store adapter.
//!
//! The rule engine never touches storage. This module defines the
//! [`RecordStore`] trait the service layer reads and writes through, and a
//! mutex-guarded in-memory implementation.

mod memory;

use chrono::NaiveDate;

use crate::models::{
    ChecklistAnswers, ChecklistPeriodRecord, CommissionMonth, CommissionRecord, Delivery,
    Occurrence, Worker,
};

pub use memory::MemoryStore;

/// Error enumeration for record store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record with the same key already exists.
    #[error("record already exists")]
    Conflict,
    /// The record to update does not exist.
    #[error("record not found")]
    NotFound,
    /// The backing store cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction so the service layer can be exercised in isolation.
///
/// Implementations must make `checklist_or_create` an at-most-once create per
/// `(worker_id, week_start)` key and serialise `complete_checklist` updates.
pub trait RecordStore: Send + Sync {
    /// Inserts a new worker; fails with `Conflict` if the id is taken.
    fn insert_worker(&self, worker: Worker) -> Result<Worker, StoreError>;

    /// Fetches a worker by id.
    fn worker(&self, worker_id: &str) -> Result<Option<Worker>, StoreError>;

    /// Lists every worker in registration order.
    fn workers(&self) -> Result<Vec<Worker>, StoreError>;

    /// Appends an occurrence.
    fn append_occurrence(&self, occurrence: Occurrence) -> Result<(), StoreError>;

    /// Lists occurrences logged within a month, oldest first.
    fn occurrences_in(&self, month: CommissionMonth) -> Result<Vec<Occurrence>, StoreError>;

    /// Appends a delivery.
    fn append_delivery(&self, delivery: Delivery) -> Result<(), StoreError>;

    /// Lists every delivery credited to a worker, oldest first.
    fn deliveries_for(&self, worker_id: &str) -> Result<Vec<Delivery>, StoreError>;

    /// Returns the checklist record for a key, creating an empty one if absent.
    fn checklist_or_create(
        &self,
        worker_id: &str,
        week_start: NaiveDate,
    ) -> Result<ChecklistPeriodRecord, StoreError>;

    /// Marks a week's checklist completed with the given answers.
    ///
    /// A record that is already completed is returned unchanged.
    fn complete_checklist(
        &self,
        worker_id: &str,
        week_start: NaiveDate,
        items: ChecklistAnswers,
        completed_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<ChecklistPeriodRecord, StoreError>;

    /// Lists every checklist record.
    fn checklists(&self) -> Result<Vec<ChecklistPeriodRecord>, StoreError>;

    /// Appends a posted commission.
    fn append_commission(&self, record: CommissionRecord) -> Result<(), StoreError>;

    /// Lists posted commissions, optionally restricted to one month.
    fn commissions(
        &self,
        month: Option<CommissionMonth>,
    ) -> Result<Vec<CommissionRecord>, StoreError>;
}
