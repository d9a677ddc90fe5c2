//! Request and response DTOs for the HTTP API
//!
//! Every response uses the same envelope: `{status: "success", data: ...}`
//! on success, `{status: "error", code, message}` on failure, with `code`
//! mirroring the HTTP status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::application::ApplicationError;
use crate::application::geometry::BatchItemOutcome;
use crate::domain::auth::AuthError;
use crate::domain::geometry::SquareArea;

/// Single calculation request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculateRequest {
    /// Side length: a positive number, or a string that parses as one
    #[schema(value_type = Object, example = json!(4))]
    pub side: Option<Value>,
    /// Unit of the side length (defaults to "unit")
    #[schema(example = "cm")]
    pub unit: Option<String>,
}

/// Batch calculation request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchCalculateRequest {
    /// Non-empty array of `{side, unit?}` items
    #[schema(value_type = Object, example = json!([{"side": 2}, {"side": 3, "unit": "m"}]))]
    pub squares: Option<Value>,
}

/// Computed square area
#[derive(Debug, Serialize, ToSchema)]
pub struct SquareAreaDto {
    /// Computed area
    #[schema(example = 16.0)]
    pub area: f64,
    /// Side length after coercion
    #[schema(example = 4.0)]
    pub side: f64,
    /// Unit of the side length
    #[schema(example = "unit")]
    pub unit: String,
    /// Unit of the area
    #[serde(rename = "squareUnit")]
    #[schema(example = "unit²")]
    pub square_unit: String,
}

impl From<SquareArea> for SquareAreaDto {
    fn from(area: SquareArea) -> Self {
        Self {
            area: area.area,
            side: area.side,
            unit: area.unit,
            square_unit: area.square_unit,
        }
    }
}

/// Envelope for a successful single calculation
#[derive(Debug, Serialize, ToSchema)]
pub struct CalculateResponse {
    #[schema(example = "success")]
    pub status: String,
    pub data: SquareAreaDto,
}

impl CalculateResponse {
    pub fn success(data: SquareAreaDto) -> Self {
        Self {
            status: "success".to_string(),
            data,
        }
    }
}

/// One entry of a batch response: a result, or the per-item failure with
/// the original input echoed back
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum BatchItemDto {
    Success(SquareAreaDto),
    Failure {
        #[schema(example = "Invalid input: 'side' must be a positive number")]
        error: String,
        #[schema(value_type = Object)]
        input: Value,
    },
}

impl From<BatchItemOutcome> for BatchItemDto {
    fn from(outcome: BatchItemOutcome) -> Self {
        match outcome {
            BatchItemOutcome::Success(area) => BatchItemDto::Success(area.into()),
            BatchItemOutcome::Failure { error, input } => BatchItemDto::Failure { error, input },
        }
    }
}

/// Envelope for a successful batch calculation
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchCalculateResponse {
    #[schema(example = "success")]
    pub status: String,
    pub data: Vec<BatchItemDto>,
}

impl BatchCalculateResponse {
    pub fn success(data: Vec<BatchItemDto>) -> Self {
        Self {
            status: "success".to_string(),
            data,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    /// Seconds since process start
    pub uptime_seconds: u64,
}

/// Error envelope returned on every failure path
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "error")]
    pub status: String,
    /// Mirrors the HTTP status code
    #[schema(example = 400)]
    pub code: u16,
    #[schema(example = "Invalid input: 'side' must be a positive number")]
    pub message: String,
}

/// Presentation-level error: an HTTP status paired with the client-facing
/// message, rendered as the error envelope
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Route not found".to_string(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Server Error - Something went wrong on our end".to_string(),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        let status = match &error {
            ApplicationError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApplicationError::Validation(_) => StatusCode::BAD_REQUEST,
            ApplicationError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApplicationError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal details never reach the client
        let message = match &error {
            ApplicationError::Configuration { .. } => {
                "Server Error - Something went wrong on our end".to_string()
            }
            other => other.to_string(),
        };

        Self { status, message }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApplicationError::Authentication(error).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            code: self.status.as_u16(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
