//! In-memory record store.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    ChecklistAnswers, ChecklistPeriodRecord, CommissionMonth, CommissionRecord, Delivery,
    Occurrence, Worker,
};

use super::{RecordStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    workers: Vec<Worker>,
    occurrences: Vec<Occurrence>,
    deliveries: Vec<Delivery>,
    checklists: Vec<ChecklistPeriodRecord>,
    commissions: Vec<CommissionRecord>,
}

/// A [`RecordStore`] held in process memory.
///
/// All tables sit behind one mutex, so create-if-absent and completion are
/// serialised across threads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn insert_worker(&self, worker: Worker) -> Result<Worker, StoreError> {
        let mut tables = self.lock()?;
        if tables.workers.iter().any(|w| w.id == worker.id) {
            return Err(StoreError::Conflict);
        }
        tables.workers.push(worker.clone());
        Ok(worker)
    }

    fn worker(&self, worker_id: &str) -> Result<Option<Worker>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.workers.iter().find(|w| w.id == worker_id).cloned())
    }

    fn workers(&self) -> Result<Vec<Worker>, StoreError> {
        Ok(self.lock()?.workers.clone())
    }

    fn append_occurrence(&self, occurrence: Occurrence) -> Result<(), StoreError> {
        self.lock()?.occurrences.push(occurrence);
        Ok(())
    }

    fn occurrences_in(&self, month: CommissionMonth) -> Result<Vec<Occurrence>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .occurrences
            .iter()
            .filter(|o| o.month() == month)
            .cloned()
            .collect())
    }

    fn append_delivery(&self, delivery: Delivery) -> Result<(), StoreError> {
        self.lock()?.deliveries.push(delivery);
        Ok(())
    }

    fn deliveries_for(&self, worker_id: &str) -> Result<Vec<Delivery>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .deliveries
            .iter()
            .filter(|d| d.worker_id == worker_id)
            .cloned()
            .collect())
    }

    fn checklist_or_create(
        &self,
        worker_id: &str,
        week_start: NaiveDate,
    ) -> Result<ChecklistPeriodRecord, StoreError> {
        let mut tables = self.lock()?;
        if let Some(existing) = tables
            .checklists
            .iter()
            .find(|r| r.matches(worker_id, week_start))
        {
            return Ok(existing.clone());
        }
        let record = ChecklistPeriodRecord::new(worker_id, week_start);
        tables.checklists.push(record.clone());
        Ok(record)
    }

    fn complete_checklist(
        &self,
        worker_id: &str,
        week_start: NaiveDate,
        items: ChecklistAnswers,
        completed_at: DateTime<Utc>,
    ) -> Result<ChecklistPeriodRecord, StoreError> {
        let mut tables = self.lock()?;
        let record = tables
            .checklists
            .iter_mut()
            .find(|r| r.matches(worker_id, week_start))
            .ok_or(StoreError::NotFound)?;
        if !record.completed {
            record.completed = true;
            record.items = items;
            record.completed_at = Some(completed_at);
        }
        Ok(record.clone())
    }

    fn checklists(&self) -> Result<Vec<ChecklistPeriodRecord>, StoreError> {
        Ok(self.lock()?.checklists.clone())
    }

    fn append_commission(&self, record: CommissionRecord) -> Result<(), StoreError> {
        self.lock()?.commissions.push(record);
        Ok(())
    }

    fn commissions(
        &self,
        month: Option<CommissionMonth>,
    ) -> Result<Vec<CommissionRecord>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .commissions
            .iter()
            .filter(|c| month.is_none_or(|m| c.month == m))
            .cloned()
            .collect())
    }
}
