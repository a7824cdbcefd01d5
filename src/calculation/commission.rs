//! Commission amount calculation.
//!
//! This module multiplies a worker's delivered value by the tier percentage
//! and rounds the result to cents.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CommissionBreakdown};

/// The result of computing a commission amount, including the audit step.
#[derive(Debug, Clone)]
pub struct CommissionComputation {
    /// The commission amount, 2 decimal places.
    pub amount: Decimal,
    /// Human-readable breakdown of the formula.
    pub breakdown: CommissionBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes `round(total_delivered_value * percentage / 100, 2)`.
///
/// Midpoints round away from zero (half-up for non-negative amounts), and
/// the result always carries two decimal places. A product outside the range
/// of `Decimal` is reported as [`EngineError::AmountOverflow`].
///
/// # Example
///
/// ```
/// use fleet_commission::calculation::compute_commission;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = compute_commission(
///     Decimal::from_str("10500.00").unwrap(),
///     Decimal::from_str("0.9").unwrap(),
/// )
/// .unwrap();
/// assert_eq!(amount.to_string(), "94.50");
/// ```
pub fn compute_commission(
    total_delivered_value: Decimal,
    percentage: Decimal,
) -> EngineResult<Decimal> {
    let product = total_delivered_value
        .checked_mul(percentage)
        .ok_or_else(|| EngineError::overflow("commission amount"))?;
    let mut amount = (product / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    Ok(amount)
}

/// Computes a commission amount and records it as an audit step.
pub fn calculate_commission_amount(
    total_delivered_value: Decimal,
    percentage: Decimal,
    step_number: u32,
) -> EngineResult<CommissionComputation> {
    let amount = compute_commission(total_delivered_value, percentage)?;
    let formula = format!(
        "{:.2} × {}% = {}",
        total_delivered_value,
        percentage.normalize(),
        amount
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "commission_amount".to_string(),
        rule_name: "Commission Amount".to_string(),
        input: serde_json::json!({
            "total_delivered_value": total_delivered_value.to_string(),
            "percentage": percentage.normalize().to_string()
        }),
        output: serde_json::json!({
            "commission_amount": amount.to_string(),
            "rounding": "half_up"
        }),
        reasoning: formula.clone(),
    };

    Ok(CommissionComputation {
        amount,
        breakdown: CommissionBreakdown {
            value: total_delivered_value,
            percentage: format!("{}%", percentage.normalize()),
            formula,
        },
        audit_step,
    })
}
