//! Configuration loading and management for the fleet commission engine.
//!
//! This module loads the injected lookup tables the rule engine depends on:
//! rate bands by worker name, checklist weekdays by driver name, the checklist
//! template and the known truck categories.
//!
//! # Example
//!
//! ```no_run
//! use fleet_commission::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/fleet").unwrap();
//! println!("{} checklist items", config.config().checklist_template().item_count());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AssignmentsConfig, ChecklistCategory, ChecklistTemplate, CommissionConfig, FleetConfig,
    NamedRateBand, RateBand, TruckCategory, TrucksConfig,
};
