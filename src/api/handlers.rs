//! HTTP request handlers for the fleet commission API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;

use super::request::{
    AtQuery, CommissionRequest, HistoryQuery, LogOccurrenceRequest, MonthQuery,
    PostCommissionRequest, RegisterDeliveryRequest, RegisterWorkerRequest, SubmitChecklistRequest,
    TemplateQuery,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/workers",
            post(register_worker_handler).get(list_workers_handler),
        )
        .route("/workers/:id/dashboard", get(dashboard_handler))
        .route(
            "/workers/:id/checklist",
            get(current_checklist_handler).post(submit_checklist_handler),
        )
        .route("/workers/:id/occurrences", get(worker_occurrences_handler))
        .route("/workers/:id/deliveries", get(worker_deliveries_handler))
        .route("/workers/:id/commissions", get(worker_commissions_handler))
        .route(
            "/occurrences",
            post(log_occurrence_handler).get(list_occurrences_handler),
        )
        .route("/deliveries", post(register_delivery_handler))
        .route("/commission/calculate", post(calculate_commission_handler))
        .route("/commission/post", post(post_commission_handler))
        .route("/commission/statistics", get(commission_statistics_handler))
        .route("/commissions", get(list_commissions_handler))
        .route("/checklist/template", get(checklist_template_handler))
        .route("/checklists", get(list_checklists_handler))
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for POST /workers.
async fn register_worker_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterWorkerRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing worker registration");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    let result = state
        .service()
        .register_worker(&request.name, request.role);
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /workers.
async fn list_workers_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(correlation_id, StatusCode::OK, state.service().workers())
}

/// Handler for GET /workers/:id/dashboard.
async fn dashboard_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    at: Result<Query<AtQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, worker_id = %worker_id, "Building dashboard");

    let now = match at {
        Ok(Query(at)) => at.resolve(),
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    respond(
        correlation_id,
        StatusCode::OK,
        state.service().dashboard(&worker_id, now),
    )
}

/// Handler for POST /occurrences.
async fn log_occurrence_handler(
    State(state): State<AppState>,
    payload: Result<Json<LogOccurrenceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing occurrence");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    let result = state.service().log_occurrence(
        &request.worker_id,
        request.category,
        &request.description,
        request.recorded_at.unwrap_or_else(Utc::now),
    );
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /deliveries.
async fn register_delivery_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterDeliveryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing delivery");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    let result = state.service().register_delivery(
        &request.worker_id,
        &request.truck_category,
        request.value,
        request.delivered_at.unwrap_or_else(Utc::now),
    );
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /commission/calculate.
///
/// Computes the commission without persisting it.
async fn calculate_commission_handler(
    State(state): State<AppState>,
    payload: Result<Json<CommissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing commission calculation");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    let result = state.service().calculate_commission(
        &request.worker_id,
        request.commission_month(),
        Utc::now(),
    );
    if let Ok(commission) = &result {
        info!(
            correlation_id = %correlation_id,
            worker_id = %commission.worker_id,
            tier = commission.tier.as_str(),
            amount = %commission.commission_amount,
            "Commission calculated"
        );
    }
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /commission/post.
async fn post_commission_handler(
    State(state): State<AppState>,
    payload: Result<Json<PostCommissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing commission posting");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    let result = state.service().post_commission(
        &request.commission.worker_id,
        request.commission.commission_month(),
        request.notes,
        Utc::now(),
    );
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /commission/statistics.
async fn commission_statistics_handler(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    respond(
        correlation_id,
        StatusCode::OK,
        state
            .service()
            .commission_statistics(query.commission_month()),
    )
}

/// Handler for GET /commissions.
async fn list_commissions_handler(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    let result = query
        .commission_month()
        .and_then(|month| state.service().commission_history(None, month));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /workers/:id/commissions.
async fn worker_commissions_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    let result = query
        .commission_month()
        .and_then(|month| state.service().commission_history(Some(&worker_id), month));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /occurrences.
async fn list_occurrences_handler(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    respond(
        correlation_id,
        StatusCode::OK,
        state.service().occurrences(query.commission_month(), None),
    )
}

/// Handler for GET /workers/:id/occurrences.
async fn worker_occurrences_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    respond(
        correlation_id,
        StatusCode::OK,
        state
            .service()
            .occurrences(query.commission_month(), Some(&worker_id)),
    )
}

/// Handler for GET /workers/:id/deliveries.
async fn worker_deliveries_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(correlation_id, StatusCode::OK, state.service().deliveries(&worker_id))
}

/// Handler for GET /checklist/template.
async fn checklist_template_handler(
    State(state): State<AppState>,
    query: Result<Query<TemplateQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    respond(
        correlation_id,
        StatusCode::OK,
        state
            .service()
            .checklist_template(query.worker_id.as_deref()),
    )
}

/// Handler for GET /workers/:id/checklist.
async fn current_checklist_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    at: Result<Query<AtQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let now = match at {
        Ok(Query(at)) => at.resolve(),
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    respond(
        correlation_id,
        StatusCode::OK,
        state.service().current_checklist(&worker_id, now),
    )
}

/// Handler for POST /workers/:id/checklist.
///
/// Permission is checked before the body is validated against the template.
async fn submit_checklist_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    at: Result<Query<AtQuery>, QueryRejection>,
    payload: Result<Json<SubmitChecklistRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        worker_id = %worker_id,
        "Processing checklist submission"
    );

    let now = match at {
        Ok(Query(at)) => at.resolve(),
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    respond(
        correlation_id,
        StatusCode::OK,
        state
            .service()
            .submit_checklist(&worker_id, request.items, now),
    )
}

/// Handler for GET /checklists.
async fn list_checklists_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(correlation_id, StatusCode::OK, state.service().checklists())
}

/// Turns a service result into a JSON response, mapping errors to status codes.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection_response(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}
