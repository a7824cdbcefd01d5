//! Monthly commission statistics.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{CommissionMonth, CommissionRecord, CommissionStatistics, TierDistribution};

/// Sums posted commission amounts, rounded to cents.
pub fn total_commission_amount<'a, I>(records: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = &'a CommissionRecord>,
{
    let total = records.into_iter().try_fold(Decimal::ZERO, |total, record| {
        total
            .checked_add(record.commission_amount)
            .ok_or_else(|| EngineError::overflow("total commission amount"))
    })?;
    Ok(to_cents(total))
}

/// Summarises the commissions posted for a month.
///
/// Records for other months are ignored. The average is zero when nothing
/// was posted.
pub fn summarize_commissions(
    month: CommissionMonth,
    records: &[CommissionRecord],
    occurrences_logged: u32,
) -> EngineResult<CommissionStatistics> {
    let in_month: Vec<&CommissionRecord> = records.iter().filter(|r| r.month == month).collect();
    let mut tier_distribution = TierDistribution::default();
    for record in &in_month {
        tier_distribution.add(record.tier);
    }
    let posted = u32::try_from(in_month.len()).unwrap_or(u32::MAX);
    let total = total_commission_amount(in_month.iter().copied())?;

    let average = if posted == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(posted)
    };

    Ok(CommissionStatistics {
        month,
        total_commissions_posted: posted,
        total_occurrences_logged: occurrences_logged,
        tier_distribution,
        average_commission: to_cents(average),
        total_commission_amount: total,
    })
}

fn to_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
