//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Error mapping follows the core taxonomy: `NotFound` → 404,
//! `InvalidInput` → 400, everything else → 500. An empty build set is a
//! 200 with a message, never an error.

use super::{
    AppState,
    types::{
        ErrorResponse, FitParams, FitResponse, HealthResponse, MbParams, MbResponse, PlanParams,
        PlanResponse, PsuParams, PsuResponse, StatusResponse,
    },
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rigplan_core::{
    Category, PlanError, PlanRequest,
    checks::{fit_check, motherboards_for, psu_check},
    limits::MAX_LISTING_LIMIT,
    plan_builds,
};

/// Map a core error to its HTTP representation.
fn error_response(err: &PlanError) -> Response {
    let status = match err {
        PlanError::NotFound { .. } => StatusCode::NOT_FOUND,
        PlanError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PlanError::Dataset(_) | PlanError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

/// Ask the narrator for an annotation, if one is configured.
///
/// Narrator failures are logged and swallowed: the annotation is advisory
/// and never affects the result.
async fn narrate(state: &AppState, topic: &str, payload: &serde_json::Value) -> Option<String> {
    let narrator = state.narrator.as_ref()?;
    narrator.explain(topic, payload).await
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get catalog status.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let categories = Category::ALL
        .iter()
        .map(|c| (c.dataset_key().to_string(), state.catalog.count_in(*c)))
        .collect();

    let response = StatusResponse {
        part_count: state.catalog.part_count(),
        price_record_count: state.catalog.price_record_count(),
        categories,
    };

    (StatusCode::OK, Json(response))
}

// =============================================================================
// FIT HANDLER
// =============================================================================

/// GPU-in-case fit check.
pub async fn fit_handler(
    State(state): State<AppState>,
    Query(params): Query<FitParams>,
) -> Response {
    let report = match fit_check(&state.catalog, &params.gpu, &params.case, &state.policy) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };

    let explanation = if params.explain {
        let payload = serde_json::json!({ "fit": report });
        narrate(&state, "fit", &payload).await
    } else {
        None
    };

    (StatusCode::OK, Json(FitResponse { report, explanation })).into_response()
}

// =============================================================================
// PSU HANDLER
// =============================================================================

/// PSU sufficiency check.
pub async fn psu_handler(
    State(state): State<AppState>,
    Query(params): Query<PsuParams>,
) -> Response {
    let report = match psu_check(
        &state.catalog,
        &params.gpu,
        &params.cpu,
        &params.psu,
        &state.policy,
    ) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };

    let explanation = if params.explain {
        let payload = serde_json::json!({ "psu": report });
        narrate(&state, "psu", &payload).await
    } else {
        None
    };

    (StatusCode::OK, Json(PsuResponse { report, explanation })).into_response()
}

// =============================================================================
// MOTHERBOARD HANDLER
// =============================================================================

/// Motherboard listing for a socket + memory standard.
pub async fn mb_handler(State(state): State<AppState>, Query(params): Query<MbParams>) -> Response {
    if params.limit == 0 || params.limit > MAX_LISTING_LIMIT {
        let err = PlanError::InvalidInput(format!(
            "limit {} outside 1..={MAX_LISTING_LIMIT}",
            params.limit
        ));
        return error_response(&err);
    }
    if params.socket.is_empty() || params.mem.is_empty() {
        let err = PlanError::InvalidInput("socket and mem must be non-empty".to_string());
        return error_response(&err);
    }

    let results = motherboards_for(&state.catalog, &params.socket, &params.mem, params.limit);
    let response = MbResponse {
        count: results.len(),
        results,
    };

    (StatusCode::OK, Json(response)).into_response()
}

// =============================================================================
// BUILD PLAN HANDLER
// =============================================================================

/// Budget-constrained build enumeration.
pub async fn plan_handler(
    State(state): State<AppState>,
    Query(params): Query<PlanParams>,
) -> Response {
    let request = PlanRequest {
        budget: params.budget,
        socket: params.socket,
        memory_standard: params.mem,
        form_factor: params.form_factor,
        include_gpu: params.include_gpu,
        top_n: params.topn,
        max_results: params.max_results,
    };

    let builds = match plan_builds(&state.catalog, &request, &state.policy) {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    let message = if builds.is_empty() {
        Some("no combinations found".to_string())
    } else {
        None
    };

    let explanation = if params.explain && !builds.is_empty() {
        let payload = serde_json::json!({
            "request": &request,
            "builds": builds,
        });
        narrate(&state, "plan", &payload).await
    } else {
        None
    };

    let response = PlanResponse {
        count: builds.len(),
        results: builds,
        params: request,
        message,
        explanation,
    };

    (StatusCode::OK, Json(response)).into_response()
}
