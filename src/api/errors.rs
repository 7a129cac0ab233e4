//! API error types mapped to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::models::SalesError;

/// Each variant maps to an HTTP status code and a `{"error": message}` body:
/// - `BadRequest` → 400
/// - `ServiceUnavailable` → 503
/// - `Internal` → 500
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    ServiceUnavailable(String),
    Internal(String)
}

impl From<SalesError> for ApiError {
    fn from(error: SalesError) -> Self {
        match error {
            SalesError::InputMalformed { .. } => ApiError::BadRequest(error.to_string()),
            SalesError::SourceUnavailable(detail) => {
                warn!("Sales data unavailable: {detail}");
                ApiError::ServiceUnavailable("Sales data temporarily unavailable".to_string())
            }
            SalesError::Internal(detail) => {
                error!("Internal error while serving request: {detail}");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::ServiceUnavailable(message) => (StatusCode::SERVICE_UNAVAILABLE, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message)
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
