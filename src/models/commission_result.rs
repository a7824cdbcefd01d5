//! Commission result models.
//!
//! This module contains the [`CommissionResult`] type and its associated
//! structures that capture the outputs of a commission calculation, the
//! posted [`CommissionRecord`], and monthly [`CommissionStatistics`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CommissionMonth;

/// Relative standing of a worker by occurrence count.
///
/// `High` means the most occurrences and earns the lowest rate of the band.
///
/// # Example
///
/// ```
/// use fleet_commission::models::OccurrenceTier;
///
/// let tier = OccurrenceTier::Median;
/// assert_eq!(serde_json::to_string(&tier).unwrap(), "\"median\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceTier {
    /// Most occurrences; earns the band minimum.
    High,
    /// Middle standing; earns the band midpoint.
    Median,
    /// Fewest occurrences; earns the band maximum.
    Low,
}

impl OccurrenceTier {
    /// Returns the lowercase label used in JSON and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            OccurrenceTier::High => "high",
            OccurrenceTier::Median => "median",
            OccurrenceTier::Low => "low",
        }
    }
}

/// A single step in the audit trace recording a rule decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Human-readable breakdown of a commission amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    /// The delivered value the percentage was applied to.
    pub value: Decimal,
    /// The percentage with a `%` suffix, e.g. "0.9%".
    pub percentage: String,
    /// The full formula, e.g. "10500.00 × 0.9% = 94.50".
    pub formula: String,
}

/// The complete result of a commission calculation for one worker and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The worker the calculation is for.
    pub worker_id: String,
    /// The worker's display name.
    pub worker_name: String,
    /// The month the calculation covers.
    pub month: CommissionMonth,
    /// Sum of the worker's delivered value within the month.
    pub total_delivered_value: Decimal,
    /// The worker's occurrence count within the month.
    pub occurrence_count: u32,
    /// The applied percentage (e.g. 0.9 means 0.9%).
    pub percentage: Decimal,
    /// The worker's tier.
    pub tier: OccurrenceTier,
    /// The commission amount, rounded to 2 decimal places.
    pub commission_amount: Decimal,
    /// Formula breakdown.
    pub calculation_breakdown: CommissionBreakdown,
    /// Audit steps for classification and computation.
    pub audit_steps: Vec<AuditStep>,
}

/// A commission that has been posted for a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRecord {
    /// Unique identifier for the posted record.
    pub id: Uuid,
    /// The worker the commission was posted for.
    pub worker_id: String,
    /// The worker's display name.
    pub worker_name: String,
    /// The month the commission covers.
    pub month: CommissionMonth,
    /// Sum of delivered value within the month.
    pub total_delivered_value: Decimal,
    /// The applied percentage.
    pub percentage: Decimal,
    /// The posted amount.
    pub commission_amount: Decimal,
    /// Occurrence count within the month.
    pub occurrence_count: u32,
    /// Tier at posting time.
    pub tier: OccurrenceTier,
    /// When the commission was posted.
    pub posted_at: DateTime<Utc>,
    /// Optional free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Number of posted commissions per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDistribution {
    /// Posted commissions in the high tier.
    pub high: u32,
    /// Posted commissions in the median tier.
    pub median: u32,
    /// Posted commissions in the low tier.
    pub low: u32,
}

impl TierDistribution {
    /// Counts one more commission in the given tier.
    pub fn add(&mut self, tier: OccurrenceTier) {
        match tier {
            OccurrenceTier::High => self.high += 1,
            OccurrenceTier::Median => self.median += 1,
            OccurrenceTier::Low => self.low += 1,
        }
    }
}

/// Aggregate figures for one month of posted commissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionStatistics {
    /// The month the statistics cover.
    pub month: CommissionMonth,
    /// Number of commissions posted in the month.
    pub total_commissions_posted: u32,
    /// Number of occurrences logged in the month.
    pub total_occurrences_logged: u32,
    /// Posted commissions per tier.
    pub tier_distribution: TierDistribution,
    /// Mean posted amount, 2 decimal places; zero when nothing was posted.
    pub average_commission: Decimal,
    /// Sum of posted amounts, 2 decimal places.
    pub total_commission_amount: Decimal,
}
