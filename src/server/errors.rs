//! API error types mapped to HTTP status codes.
//!
//! Each [`ApiError`] variant produces a JSON body `{"error": "message"}`:
//! - `BadRequest` → 400
//! - `ServiceUnavailable` → 503
//! - `Internal` → 500

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde_json::json;

use crate::error::AnamnesisError;

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Provide text.";
pub const NOT_READY_MESSAGE: &str = "Model is still loading";
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed";

#[derive(Debug)]
pub enum ApiError {
    /// Invalid request body (400).
    BadRequest(String),
    /// Model not loaded yet (503).
    ServiceUnavailable(String),
    /// Unexpected server error (500).
    Internal(String),
}

impl ApiError {
    pub fn invalid_input() -> Self {
        ApiError::BadRequest(INVALID_INPUT_MESSAGE.to_string())
    }
}

impl From<AnamnesisError> for ApiError {
    fn from(err: AnamnesisError) -> Self {
        match err {
            err if err.is_client_error() => ApiError::invalid_input(),
            AnamnesisError::ModelNotReady => {
                ApiError::ServiceUnavailable(NOT_READY_MESSAGE.to_string())
            }
            other => {
                error!("Prediction failed: {other}");
                ApiError::Internal(PREDICTION_FAILED_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
