//! Fleet service: the workflows that sit between the HTTP layer and the
//! rule engine.
//!
//! The service reads and writes records through a [`RecordStore`], feeds
//! them to the pure functions in [`crate::calculation`] and assembles the
//! results. Every operation that depends on the current time takes `now`
//! explicitly.

mod views;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{
    assigned_day, authorize_submission, calculate_commission_amount, checklist_gate,
    classify_worker, summarize_commissions, total_commission_amount, validate_submission,
    week_start,
};
use crate::config::FleetConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ChecklistAnswers, ChecklistPeriodRecord, CommissionMonth, CommissionRecord,
    CommissionResult, CommissionStatistics, Delivery, Occurrence, OccurrenceCategory,
    OccurrenceCountSnapshot, Role, Worker, total_delivered_value, totals_by_truck,
};
use crate::store::RecordStore;

pub use views::{
    ChecklistStatus, ChecklistTemplateView, CommissionHistory, CurrentChecklist, Dashboard,
    DeliveryHistory, OccurrenceLog,
};

/// The version string recorded on every commission result.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Orchestrates fleet workflows over a record store and a loaded configuration.
#[derive(Clone)]
pub struct FleetService {
    store: Arc<dyn RecordStore>,
    config: Arc<FleetConfig>,
}

impl FleetService {
    /// Creates a service over the given store and configuration.
    pub fn new(store: Arc<dyn RecordStore>, config: Arc<FleetConfig>) -> Self {
        Self { store, config }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Registers a new worker.
    ///
    /// Admins cannot be registered. Drivers pick up their checklist weekday
    /// from the configured assignment table; helpers never get one.
    pub fn register_worker(&self, name: &str, role: Role) -> EngineResult<Worker> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidRecord {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if role == Role::Admin {
            return Err(EngineError::InvalidRecord {
                field: "role".to_string(),
                message: "admin accounts cannot be registered".to_string(),
            });
        }

        let assigned_weekday = match role {
            Role::Driver => self.config.assigned_weekday_for(name),
            _ => None,
        };
        let worker = Worker {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            role,
            assigned_weekday,
        };
        let worker = self.store.insert_worker(worker)?;
        info!(
            worker_id = %worker.id,
            role = %worker.role,
            assigned_weekday = ?worker.assigned_weekday,
            "Worker registered"
        );
        Ok(worker)
    }

    /// Lists every registered worker.
    pub fn workers(&self) -> EngineResult<Vec<Worker>> {
        Ok(self.store.workers()?)
    }

    /// Fetches a worker, failing with [`EngineError::WorkerNotFound`].
    pub fn worker(&self, worker_id: &str) -> EngineResult<Worker> {
        self.store
            .worker(worker_id)?
            .ok_or_else(|| EngineError::WorkerNotFound {
                worker_id: worker_id.to_string(),
            })
    }

    /// Logs an occurrence against a worker.
    pub fn log_occurrence(
        &self,
        worker_id: &str,
        category: OccurrenceCategory,
        description: &str,
        recorded_at: DateTime<Utc>,
    ) -> EngineResult<Occurrence> {
        let worker = self.worker(worker_id)?;
        let occurrence = Occurrence {
            id: Uuid::new_v4().to_string(),
            worker_id: worker.id,
            category,
            description: description.trim().to_string(),
            recorded_at,
        };
        self.store.append_occurrence(occurrence.clone())?;
        info!(
            worker_id = %occurrence.worker_id,
            category = ?occurrence.category,
            "Occurrence logged"
        );
        Ok(occurrence)
    }

    /// Registers a delivery for a worker.
    ///
    /// The truck category must be configured and the value non-negative.
    pub fn register_delivery(
        &self,
        worker_id: &str,
        truck_category: &str,
        value: Decimal,
        delivered_at: DateTime<Utc>,
    ) -> EngineResult<Delivery> {
        let worker = self.worker(worker_id)?;
        if !self.config.is_known_truck(truck_category) {
            return Err(EngineError::InvalidRecord {
                field: "truck_category".to_string(),
                message: format!("unknown truck category '{}'", truck_category),
            });
        }
        if value < Decimal::ZERO {
            return Err(EngineError::InvalidRecord {
                field: "value".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        let delivery = Delivery {
            id: Uuid::new_v4().to_string(),
            worker_id: worker.id,
            truck_category: truck_category.to_string(),
            value,
            delivered_at,
        };
        self.store.append_delivery(delivery.clone())?;
        info!(
            worker_id = %delivery.worker_id,
            truck_category = %delivery.truck_category,
            value = %delivery.value,
            "Delivery registered"
        );
        Ok(delivery)
    }

    /// Lists every delivery credited to a worker, grouped by truck as well.
    pub fn deliveries(&self, worker_id: &str) -> EngineResult<DeliveryHistory> {
        let worker = self.worker(worker_id)?;
        let deliveries = self.store.deliveries_for(&worker.id)?;
        Ok(DeliveryHistory {
            deliveries_by_truck: totals_by_truck(&deliveries)?,
            total_delivered_value: total_delivered_value(&deliveries)?,
            worker_id: worker.id,
            deliveries,
        })
    }

    /// Lists the occurrences logged in a month, optionally for one worker.
    pub fn occurrences(
        &self,
        month: CommissionMonth,
        worker_id: Option<&str>,
    ) -> EngineResult<OccurrenceLog> {
        ensure_valid_month(month)?;
        let worker_id = self.resolve_worker_filter(worker_id)?;
        let occurrences: Vec<Occurrence> = self
            .store
            .occurrences_in(month)?
            .into_iter()
            .filter(|o| worker_id.as_ref().is_none_or(|id| &o.worker_id == id))
            .collect();
        Ok(OccurrenceLog {
            month,
            worker_id,
            occurrence_count: occurrences.len(),
            occurrences,
        })
    }

    /// Builds the occurrence-count snapshot for a month.
    ///
    /// Every commission-earning worker is seeded with zero in registration
    /// order; occurrences for anyone else are ignored.
    pub fn occurrence_snapshot(
        &self,
        month: CommissionMonth,
    ) -> EngineResult<OccurrenceCountSnapshot> {
        let mut snapshot = OccurrenceCountSnapshot::new();
        for worker in self.store.workers()? {
            if worker.role.earns_commission() {
                snapshot.record(worker.id, 0);
            }
        }
        for occurrence in self.store.occurrences_in(month)? {
            if snapshot.count_for(&occurrence.worker_id).is_some() {
                snapshot.increment(&occurrence.worker_id);
            }
        }
        debug!(
            %month,
            cohort_size = snapshot.len(),
            total = snapshot.total(),
            "Snapshot built"
        );
        Ok(snapshot)
    }

    /// Calculates a worker's commission for a month without persisting it.
    pub fn calculate_commission(
        &self,
        worker_id: &str,
        month: CommissionMonth,
        now: DateTime<Utc>,
    ) -> EngineResult<CommissionResult> {
        ensure_valid_month(month)?;
        let worker = self.worker(worker_id)?;
        let snapshot = self.occurrence_snapshot(month)?;

        let classification =
            classify_worker(&worker.id, &snapshot, &worker.name, &self.config, 1);

        let deliveries = self.store.deliveries_for(&worker.id)?;
        let total = total_delivered_value(deliveries.iter().filter(|d| d.month() == month))?;
        let computation = calculate_commission_amount(total, classification.percentage, 2)?;

        let result = CommissionResult {
            calculation_id: Uuid::new_v4(),
            timestamp: now,
            engine_version: ENGINE_VERSION.to_string(),
            worker_id: worker.id,
            worker_name: worker.name,
            month,
            total_delivered_value: total,
            occurrence_count: classification.occurrence_count,
            percentage: classification.percentage,
            tier: classification.tier,
            commission_amount: computation.amount,
            calculation_breakdown: computation.breakdown,
            audit_steps: vec![classification.audit_step, computation.audit_step],
        };
        debug!(
            worker_id = %result.worker_id,
            %month,
            tier = result.tier.as_str(),
            amount = %result.commission_amount,
            "Commission calculated"
        );
        Ok(result)
    }

    /// Recalculates and persists a worker's commission for a month.
    pub fn post_commission(
        &self,
        worker_id: &str,
        month: CommissionMonth,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> EngineResult<CommissionRecord> {
        let result = self.calculate_commission(worker_id, month, now)?;
        let record = CommissionRecord {
            id: Uuid::new_v4(),
            worker_id: result.worker_id,
            worker_name: result.worker_name,
            month,
            total_delivered_value: result.total_delivered_value,
            percentage: result.percentage,
            commission_amount: result.commission_amount,
            occurrence_count: result.occurrence_count,
            tier: result.tier,
            posted_at: now,
            notes: notes.filter(|n| !n.trim().is_empty()),
        };
        self.store.append_commission(record.clone())?;
        info!(
            worker_id = %record.worker_id,
            %month,
            amount = %record.commission_amount,
            "Commission posted"
        );
        Ok(record)
    }

    /// Summarises the commissions posted for a month.
    pub fn commission_statistics(
        &self,
        month: CommissionMonth,
    ) -> EngineResult<CommissionStatistics> {
        ensure_valid_month(month)?;
        let records = self.store.commissions(Some(month))?;
        let occurrences = self.store.occurrences_in(month)?.len();
        let occurrences = u32::try_from(occurrences).unwrap_or(u32::MAX);
        summarize_commissions(month, &records, occurrences)
    }

    /// Lists posted commissions, newest first.
    ///
    /// Narrowed to one worker and one month when they are given.
    pub fn commission_history(
        &self,
        worker_id: Option<&str>,
        month: Option<CommissionMonth>,
    ) -> EngineResult<CommissionHistory> {
        if let Some(month) = month {
            ensure_valid_month(month)?;
        }
        let worker_id = self.resolve_worker_filter(worker_id)?;
        let mut commissions: Vec<CommissionRecord> = self
            .store
            .commissions(month)?
            .into_iter()
            .filter(|c| worker_id.as_ref().is_none_or(|id| &c.worker_id == id))
            .collect();
        commissions.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));

        Ok(CommissionHistory {
            worker_id,
            month,
            total_commissions: commissions.len(),
            total_amount: total_commission_amount(&commissions)?,
            commissions,
        })
    }

    /// Builds a worker's dashboard as of `now`.
    pub fn dashboard(&self, worker_id: &str, now: DateTime<Utc>) -> EngineResult<Dashboard> {
        let worker = self.worker(worker_id)?;
        let month = CommissionMonth::containing(now.date_naive());

        let deliveries = self.store.deliveries_for(&worker.id)?;
        let in_month: Vec<&Delivery> = deliveries.iter().filter(|d| d.month() == month).collect();
        let deliveries_by_truck = totals_by_truck(in_month.iter().copied())?;
        let total = total_delivered_value(in_month.iter().copied())?;

        let commission_preview = self.calculate_commission(&worker.id, month, now)?;
        let checklist = self.checklist_status(&worker, now)?;

        Ok(Dashboard {
            worker,
            month,
            deliveries_by_truck,
            total_delivered_value: total,
            commission_preview,
            checklist,
        })
    }

    fn resolve_worker_filter(&self, worker_id: Option<&str>) -> EngineResult<Option<String>> {
        worker_id
            .map(|id| self.worker(id).map(|worker| worker.id))
            .transpose()
    }

    fn checklist_status(
        &self,
        worker: &Worker,
        now: DateTime<Utc>,
    ) -> EngineResult<ChecklistStatus> {
        let week_start = week_start(now.naive_utc())?;
        let gate = checklist_gate(worker.role, worker.assigned_weekday, now.date_naive());

        let completed = match assigned_day(worker) {
            Ok(_) => self.store.checklist_or_create(&worker.id, week_start)?.completed,
            Err(_) => false,
        };

        Ok(ChecklistStatus {
            assigned_weekday: worker.assigned_weekday.filter(|_| worker.is_driver()),
            gate,
            week_start,
            completed,
            checklist_pending: gate.should_complete && !completed,
        })
    }

    /// Returns the checklist template, scoped to a worker when one is given.
    ///
    /// A worker without a checklist assignment is rejected.
    pub fn checklist_template(
        &self,
        worker_id: Option<&str>,
    ) -> EngineResult<ChecklistTemplateView> {
        let assigned_weekday = match worker_id {
            Some(worker_id) => Some(assigned_day(&self.worker(worker_id)?)?),
            None => None,
        };
        Ok(ChecklistTemplateView {
            template: self.config.checklist_template().clone(),
            assigned_weekday,
        })
    }

    /// Returns the worker's checklist for the week containing `now`.
    ///
    /// The weekly record is created on first access.
    pub fn current_checklist(
        &self,
        worker_id: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<CurrentChecklist> {
        let worker = self.worker(worker_id)?;
        let assigned_weekday = assigned_day(&worker)?;
        let record = self
            .store
            .checklist_or_create(&worker.id, week_start(now.naive_utc())?)?;
        let gate = checklist_gate(worker.role, worker.assigned_weekday, now.date_naive());
        Ok(CurrentChecklist {
            record,
            assigned_weekday,
            gate,
        })
    }

    /// Submits the worker's checklist for the week containing `now`.
    ///
    /// Permission is checked first, then the answers are validated against
    /// the template. A week that is already completed is returned unchanged.
    pub fn submit_checklist(
        &self,
        worker_id: &str,
        items: ChecklistAnswers,
        now: DateTime<Utc>,
    ) -> EngineResult<ChecklistPeriodRecord> {
        let worker = self.worker(worker_id)?;
        authorize_submission(&worker, now.date_naive())?;
        validate_submission(self.config.checklist_template(), &items)?;

        let week_start = week_start(now.naive_utc())?;
        let existing = self.store.checklist_or_create(&worker.id, week_start)?;
        if existing.completed {
            debug!(worker_id = %worker.id, %week_start, "Checklist already completed");
            return Ok(existing);
        }

        let record = self
            .store
            .complete_checklist(&worker.id, week_start, items, now)?;
        info!(worker_id = %worker.id, %week_start, "Checklist completed");
        Ok(record)
    }

    /// Lists every stored checklist record, newest week first.
    pub fn checklists(&self) -> EngineResult<Vec<ChecklistPeriodRecord>> {
        let mut records = self.store.checklists()?;
        records.sort_by(|a, b| b.week_start.cmp(&a.week_start));
        Ok(records)
    }
}

fn ensure_valid_month(month: CommissionMonth) -> EngineResult<()> {
    if month.is_valid() {
        Ok(())
    } else {
        Err(EngineError::InvalidRecord {
            field: "month".to_string(),
            message: format!("{} is not a calendar month", month.month),
        })
    }
}
