//! Rule engine for the fleet commission system.
//!
//! This module contains the pure rule functions: occurrence tier
//! classification, commission amount calculation, weekly period resolution,
//! checklist gating, checklist submission validation and monthly commission
//! statistics. None of them perform I/O or read the clock.

mod checklist_gate;
mod checklist_validation;
mod commission;
mod statistics;
mod tier_classifier;
mod week_period;

pub use checklist_gate::{
    ChecklistGate, assigned_day, authorize_submission, checklist_gate, gate_for_day,
};
pub use checklist_validation::validate_submission;
pub use commission::{CommissionComputation, calculate_commission_amount, compute_commission};
pub use statistics::{summarize_commissions, total_commission_amount};
pub use tier_classifier::{
    TierClassification, classify, classify_with_band, classify_worker, determine_tier,
};
pub use week_period::{week_start, week_start_of};
