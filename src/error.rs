//! Error types for the fleet commission engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every rejection the engine can report to its caller.

use thiserror::Error;

use crate::models::DayOfWeek;
use crate::store::StoreError;

/// The main error type for the fleet commission engine.
///
/// All fallible operations in the engine return this error type, so the
/// HTTP layer can map each rejection to a status code in one place.
///
/// # Example
///
/// ```
/// use fleet_commission::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/commission.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/commission.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is semantically invalid.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },

    /// No worker exists with the given id.
    #[error("Worker not found: {worker_id}")]
    WorkerNotFound {
        /// The id that was looked up.
        worker_id: String,
    },

    /// An incoming record was rejected before it reached the store.
    #[error("Invalid record field '{field}': {message}")]
    InvalidRecord {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The worker is not a driver, or is a driver with no assigned weekday.
    #[error("Worker '{worker_id}' has no checklist assignment")]
    ChecklistNotAssigned {
        /// The worker that attempted the checklist operation.
        worker_id: String,
    },

    /// The checklist cannot be filled yet this week.
    #[error("Checklist can only be filled from {assigned_day} onwards")]
    ChecklistWindowClosed {
        /// The driver's assigned weekday.
        assigned_day: DayOfWeek,
    },

    /// A checklist submission is missing a category or an item.
    #[error("{}", incomplete_message(category, item.as_deref()))]
    ChecklistIncomplete {
        /// The first category with a missing answer.
        category: String,
        /// The first missing item, or `None` when the whole category is absent.
        item: Option<String>,
    },

    /// A monetary sum or product exceeded the range of `Decimal`.
    #[error("Amount overflow while computing {context}")]
    AmountOverflow {
        /// What was being computed.
        context: String,
    },

    /// The record store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

fn incomplete_message(category: &str, item: Option<&str>) -> String {
    match item {
        Some(item) => format!("Checklist incomplete: missing item '{}' in '{}'", item, category),
        None => format!("Checklist incomplete: missing category '{}'", category),
    }
}

impl From<StoreError> for EngineError {
    fn from(error: StoreError) -> Self {
        EngineError::Storage {
            message: error.to_string(),
        }
    }
}

impl EngineError {
    pub(crate) fn overflow(context: &str) -> Self {
        EngineError::AmountOverflow {
            context: context.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_worker_not_found_displays_id() {
        let error = EngineError::WorkerNotFound {
            worker_id: "w-404".to_string(),
        };
        assert_eq!(error.to_string(), "Worker not found: w-404");
    }

    #[test]
    fn test_window_closed_displays_assigned_day() {
        let error = EngineError::ChecklistWindowClosed {
            assigned_day: DayOfWeek::Thursday,
        };
        assert_eq!(
            error.to_string(),
            "Checklist can only be filled from Thursday onwards"
        );
    }

    #[test]
    fn test_incomplete_displays_missing_item() {
        let error = EngineError::ChecklistIncomplete {
            category: "Motor".to_string(),
            item: Some("Nível do óleo".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Checklist incomplete: missing item 'Nível do óleo' in 'Motor'"
        );
    }

    #[test]
    fn test_incomplete_displays_missing_category() {
        let error = EngineError::ChecklistIncomplete {
            category: "Pneus".to_string(),
            item: None,
        };
        assert_eq!(
            error.to_string(),
            "Checklist incomplete: missing category 'Pneus'"
        );
    }

    #[test]
    fn test_amount_overflow_displays_context() {
        let error = EngineError::overflow("total delivered value");
        assert_eq!(
            error.to_string(),
            "Amount overflow while computing total delivered value"
        );
    }

    #[test]
    fn test_store_error_converts_to_storage() {
        let error: EngineError = StoreError::Unavailable("offline".to_string()).into();
        assert_eq!(error.to_string(), "Storage error: store unavailable: offline");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }
}
