//! Delivery records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CommissionMonth;
use crate::error::{EngineError, EngineResult};

/// A delivery made by one worker.
///
/// The truck category is kept for reporting only; commission rates never
/// depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Unique identifier for the delivery.
    pub id: String,
    /// The worker credited with the delivery.
    pub worker_id: String,
    /// The truck category code (e.g., "BKO").
    pub truck_category: String,
    /// The value of the goods delivered.
    pub value: Decimal,
    /// When the delivery was registered.
    pub delivered_at: DateTime<Utc>,
}

impl Delivery {
    /// Returns the commission month this delivery counts towards.
    pub fn month(&self) -> CommissionMonth {
        CommissionMonth::containing(self.delivered_at.date_naive())
    }
}

/// Delivered value for one truck category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruckTotal {
    /// The truck category code.
    pub truck_category: String,
    /// Number of deliveries.
    pub count: u32,
    /// Sum of delivered value.
    pub total_value: Decimal,
}

/// Sums delivered value across deliveries.
///
/// Fails with [`EngineError::AmountOverflow`] when the sum leaves the range
/// of `Decimal`.
pub fn total_delivered_value<'a, I>(deliveries: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = &'a Delivery>,
{
    deliveries.into_iter().try_fold(Decimal::ZERO, |total, d| {
        total
            .checked_add(d.value)
            .ok_or_else(|| EngineError::overflow("total delivered value"))
    })
}

/// Groups deliveries by truck category, keeping first-seen order.
pub fn totals_by_truck<'a, I>(deliveries: I) -> EngineResult<Vec<TruckTotal>>
where
    I: IntoIterator<Item = &'a Delivery>,
{
    let mut totals: Vec<TruckTotal> = Vec::new();
    for delivery in deliveries {
        match totals
            .iter_mut()
            .find(|t| t.truck_category == delivery.truck_category)
        {
            Some(total) => {
                total.count += 1;
                total.total_value = total
                    .total_value
                    .checked_add(delivery.value)
                    .ok_or_else(|| EngineError::overflow("delivered value by truck"))?;
            }
            None => totals.push(TruckTotal {
                truck_category: delivery.truck_category.clone(),
                count: 1,
                total_value: delivery.value,
            }),
        }
    }
    Ok(totals)
}
