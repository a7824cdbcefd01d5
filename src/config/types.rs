//! Configuration types for commission tiering and checklist gating.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DayOfWeek, OccurrenceTier};

/// A triple of commission percentages selected by tier.
///
/// `min` goes to the workers with the most occurrences, `max` to those with
/// the fewest.
///
/// # Example
///
/// ```
/// use fleet_commission::config::RateBand;
/// use fleet_commission::models::OccurrenceTier;
/// use rust_decimal::Decimal;
///
/// let band = RateBand::standard();
/// assert_eq!(band.rate_for(OccurrenceTier::High), Decimal::new(8, 1));
/// assert_eq!(band.rate_for(OccurrenceTier::Low), Decimal::new(10, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    /// Percentage for the high-occurrence tier.
    pub min: Decimal,
    /// Percentage for the median tier.
    pub mid: Decimal,
    /// Percentage for the low-occurrence tier.
    pub max: Decimal,
}

impl RateBand {
    /// The default band: 0.8 / 0.9 / 1.0.
    pub fn standard() -> Self {
        Self {
            min: Decimal::new(8, 1),
            mid: Decimal::new(9, 1),
            max: Decimal::new(10, 1),
        }
    }

    /// Returns the percentage for a tier.
    pub fn rate_for(&self, tier: OccurrenceTier) -> Decimal {
        match tier {
            OccurrenceTier::High => self.min,
            OccurrenceTier::Median => self.mid,
            OccurrenceTier::Low => self.max,
        }
    }

    /// Returns true when the band is non-negative and ordered min <= mid <= max.
    pub fn is_ordered(&self) -> bool {
        self.min >= Decimal::ZERO && self.min <= self.mid && self.mid <= self.max
    }
}

/// A rate band reserved for one named worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRateBand {
    /// The worker name the band applies to.
    pub name: String,
    /// The band itself.
    pub band: RateBand,
}

/// Commission configuration from commission.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionConfig {
    /// The band used for everyone without a named band.
    pub default_band: RateBand,
    /// Bands reserved for specific workers.
    #[serde(default)]
    pub special_bands: Vec<NamedRateBand>,
}

/// Checklist weekday assignments from assignments.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentsConfig {
    /// Map of driver name to the weekday the checklist is due.
    pub assignments: BTreeMap<String, DayOfWeek>,
}

/// One category of the checklist template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistCategory {
    /// The category name (e.g., "Motor").
    pub name: String,
    /// Items that must each receive an answer.
    pub items: Vec<String>,
}

/// The fixed checklist template from checklist.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    /// Categories in the order they are presented and validated.
    pub categories: Vec<ChecklistCategory>,
}

impl ChecklistTemplate {
    /// Returns the total number of items across all categories.
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

/// A truck category from trucks.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruckCategory {
    /// The truck code (e.g., "BKO").
    pub code: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Trucks configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrucksConfig {
    /// Known truck categories.
    pub trucks: Vec<TruckCategory>,
}

/// Normalises a worker name for table lookups.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The complete fleet configuration loaded from YAML files.
///
/// Name lookups are trimmed and case-insensitive, so "  VALDINEY " and
/// "Valdiney" select the same band and weekday.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    commission: CommissionConfig,
    assignments: BTreeMap<String, DayOfWeek>,
    checklist: ChecklistTemplate,
    trucks: Vec<TruckCategory>,
}

impl FleetConfig {
    /// Creates a new FleetConfig from its component parts.
    pub fn new(
        commission: CommissionConfig,
        assignments: AssignmentsConfig,
        checklist: ChecklistTemplate,
        trucks: TrucksConfig,
    ) -> Self {
        let assignments = assignments
            .assignments
            .into_iter()
            .map(|(name, day)| (normalize_name(&name), day))
            .collect();
        Self {
            commission,
            assignments,
            checklist,
            trucks: trucks.trucks,
        }
    }

    /// Returns the commission configuration.
    pub fn commission(&self) -> &CommissionConfig {
        &self.commission
    }

    /// Returns the rate band for a worker name.
    pub fn band_for(&self, worker_name: &str) -> &RateBand {
        let wanted = normalize_name(worker_name);
        self.commission
            .special_bands
            .iter()
            .find(|special| normalize_name(&special.name) == wanted)
            .map(|special| &special.band)
            .unwrap_or(&self.commission.default_band)
    }

    /// Returns the checklist weekday assigned to a driver name, if any.
    pub fn assigned_weekday_for(&self, worker_name: &str) -> Option<DayOfWeek> {
        self.assignments.get(&normalize_name(worker_name)).copied()
    }

    /// Returns the checklist template.
    pub fn checklist_template(&self) -> &ChecklistTemplate {
        &self.checklist
    }

    /// Returns the known truck categories.
    pub fn trucks(&self) -> &[TruckCategory] {
        &self.trucks
    }

    /// Returns true if the truck code is configured.
    pub fn is_known_truck(&self, code: &str) -> bool {
        self.trucks.iter().any(|truck| truck.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_config() -> FleetConfig {
        let mut assignments = BTreeMap::new();
        assignments.insert("Davi".to_string(), DayOfWeek::Monday);
        assignments.insert("Valdiney".to_string(), DayOfWeek::Thursday);
        FleetConfig::new(
            CommissionConfig {
                default_band: RateBand::standard(),
                special_bands: vec![NamedRateBand {
                    name: "Valdiney".to_string(),
                    band: RateBand {
                        min: dec("2.0"),
                        mid: dec("2.25"),
                        max: dec("2.5"),
                    },
                }],
            },
            AssignmentsConfig { assignments },
            ChecklistTemplate::default(),
            TrucksConfig {
                trucks: vec![TruckCategory {
                    code: "BKO".to_string(),
                    description: None,
                }],
            },
        )
    }

    #[test]
    fn test_band_for_special_name_ignores_case_and_whitespace() {
        let config = sample_config();
        assert_eq!(config.band_for("  vALDINEY ").max, dec("2.5"));
        assert_eq!(config.band_for("Valdiney").mid, dec("2.25"));
    }

    #[test]
    fn test_band_for_other_names_is_default() {
        let config = sample_config();
        assert_eq!(config.band_for("Davi"), &RateBand::standard());
        assert_eq!(config.band_for(""), &RateBand::standard());
    }

    #[test]
    fn test_assigned_weekday_lookup() {
        let config = sample_config();
        assert_eq!(config.assigned_weekday_for("davi"), Some(DayOfWeek::Monday));
        assert_eq!(config.assigned_weekday_for("Claudio"), None);
    }

    #[test]
    fn test_known_truck() {
        let config = sample_config();
        assert!(config.is_known_truck("BKO"));
        assert!(!config.is_known_truck("XYZ"));
    }

    #[test]
    fn test_band_ordering() {
        assert!(RateBand::standard().is_ordered());
        let inverted = RateBand {
            min: dec("1.0"),
            mid: dec("0.9"),
            max: dec("0.8"),
        };
        assert!(!inverted.is_ordered());
    }

    #[test]
    fn test_deserialize_band_from_quoted_yaml() {
        let yaml = "min: \"2.0\"\nmid: \"2.25\"\nmax: \"2.5\"\n";
        let band: RateBand = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(band.mid, dec("2.25"));
    }
}
