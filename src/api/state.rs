//! Application state for the fleet commission API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::FleetService;
use crate::store::{MemoryStore, RecordStore};

/// Shared application state.
///
/// Wraps the fleet service, which in turn holds the loaded configuration
/// and the record store.
#[derive(Clone)]
pub struct AppState {
    service: Arc<FleetService>,
}

impl AppState {
    /// Creates application state backed by an in-memory store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Creates application state backed by the given store.
    pub fn with_store(config: ConfigLoader, store: Arc<dyn RecordStore>) -> Self {
        let service = FleetService::new(store, Arc::new(config.into_config()));
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns the fleet service.
    pub fn service(&self) -> &FleetService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
