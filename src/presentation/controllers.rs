//! Route handlers

use axum::{Json, extract::State};
use std::sync::Arc;
use std::time::Instant;

use crate::application::geometry::{BatchCalculateUseCase, CalculateAreaUseCase};
use crate::config::Config;
use crate::presentation::extractors::ApiJson;
use crate::presentation::models::{
    ApiError, BatchCalculateRequest, BatchCalculateResponse, CalculateRequest, CalculateResponse,
    ErrorResponse, HealthResponse,
};

/// Shared application state for the handlers
#[derive(Clone)]
pub struct AppState {
    pub calculate_use_case: Arc<CalculateAreaUseCase>,
    pub batch_use_case: Arc<BatchCalculateUseCase>,
    pub config: Arc<Config>,
    pub startup_time: Instant,
}

/// Compute the area of a single square
#[utoipa::path(
    post,
    path = "/v1/calculate",
    tag = "calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Area computed", body = CalculateResponse),
        (status = 400, description = "Missing or invalid side", body = ErrorResponse),
        (status = 401, description = "Invalid or missing API key", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    security(("bearer_api_key" = []))
)]
pub async fn calculate(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let result = state
        .calculate_use_case
        .execute(payload.side.as_ref(), payload.unit.as_deref())
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    Ok(Json(CalculateResponse::success(result.into())))
}

/// Compute the areas of a batch of squares, isolating per-item failures
#[utoipa::path(
    post,
    path = "/v1/batch-calculate",
    tag = "calculate",
    request_body = BatchCalculateRequest,
    responses(
        (status = 200, description = "Batch processed; failed items are reported in place", body = BatchCalculateResponse),
        (status = 400, description = "Missing, non-array, or empty squares field", body = ErrorResponse),
        (status = 401, description = "Invalid or missing API key", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    security(("bearer_api_key" = []))
)]
pub async fn batch_calculate(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BatchCalculateRequest>,
) -> Result<Json<BatchCalculateResponse>, ApiError> {
    let squares = payload
        .squares
        .as_ref()
        .and_then(|value| value.as_array())
        .filter(|items| !items.is_empty())
        .ok_or_else(|| {
            ApiError::bad_request("Request must include a non-empty 'squares' array")
        })?;

    let outcomes = state.batch_use_case.execute(squares);
    let data = outcomes.into_iter().map(Into::into).collect();

    Ok(Json(BatchCalculateResponse::success(data)))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.startup_time.elapsed().as_secs(),
    })
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
