//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading fleet
//! configurations from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AssignmentsConfig, ChecklistTemplate, CommissionConfig, FleetConfig, TrucksConfig,
    normalize_name,
};

/// Loads and validates fleet configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/fleet/
/// ├── commission.yaml   # Default rate band and named special bands
/// ├── assignments.yaml  # Driver name -> checklist weekday
/// ├── checklist.yaml    # Checklist categories and items
/// └── trucks.yaml       # Known truck categories
/// ```
///
/// # Example
///
/// ```no_run
/// use fleet_commission::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/fleet").unwrap();
/// let band = loader.config().band_for("Valdiney");
/// println!("Valdiney earns between {}% and {}%", band.min, band.max);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: FleetConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A rate band is out of order, a checklist category is empty, or a
    ///   truck code is duplicated
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fleet_commission::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/fleet")?;
    /// # Ok::<(), fleet_commission::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let commission = Self::load_yaml::<CommissionConfig>(&path.join("commission.yaml"))?;
        let assignments = Self::load_yaml::<AssignmentsConfig>(&path.join("assignments.yaml"))?;
        let checklist = Self::load_yaml::<ChecklistTemplate>(&path.join("checklist.yaml"))?;
        let trucks = Self::load_yaml::<TrucksConfig>(&path.join("trucks.yaml"))?;

        Self::validate(&commission, &checklist, &trucks)?;

        debug!(
            path = %path.display(),
            special_bands = commission.special_bands.len(),
            assignments = assignments.assignments.len(),
            checklist_items = checklist.item_count(),
            trucks = trucks.trucks.len(),
            "Loaded fleet configuration"
        );

        Ok(Self {
            config: FleetConfig::new(commission, assignments, checklist, trucks),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(
        commission: &CommissionConfig,
        checklist: &ChecklistTemplate,
        trucks: &TrucksConfig,
    ) -> EngineResult<()> {
        if !commission.default_band.is_ordered() {
            return Err(EngineError::InvalidConfig {
                message: "default band must satisfy 0 <= min <= mid <= max".to_string(),
            });
        }

        let mut seen_names = HashSet::new();
        for special in &commission.special_bands {
            if !special.band.is_ordered() {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "band for '{}' must satisfy 0 <= min <= mid <= max",
                        special.name
                    ),
                });
            }
            if !seen_names.insert(normalize_name(&special.name)) {
                return Err(EngineError::InvalidConfig {
                    message: format!("duplicate special band for '{}'", special.name),
                });
            }
        }

        if checklist.categories.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "checklist template has no categories".to_string(),
            });
        }
        for category in &checklist.categories {
            if category.items.is_empty() {
                return Err(EngineError::InvalidConfig {
                    message: format!("checklist category '{}' has no items", category.name),
                });
            }
        }

        let mut seen_trucks = HashSet::new();
        for truck in &trucks.trucks {
            if !seen_trucks.insert(truck.code.as_str()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("duplicate truck category '{}'", truck.code),
                });
            }
        }

        Ok(())
    }

    /// Returns the underlying fleet configuration.
    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Consumes the loader and returns the fleet configuration.
    pub fn into_config(self) -> FleetConfig {
        self.config
    }
}
