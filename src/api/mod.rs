//! HTTP API module for the fleet commission engine.
//!
//! This module exposes worker registration, occurrence and delivery
//! logging, commission calculation and the weekly vehicle checklist as
//! REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AtQuery, CommissionRequest, HistoryQuery, LogOccurrenceRequest, MonthQuery,
    PostCommissionRequest, RegisterDeliveryRequest, RegisterWorkerRequest, SubmitChecklistRequest,
    TemplateQuery,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
