//! Request handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inference::Prediction;
use crate::server::errors::ApiError;
use crate::server::state::AppState;

/// Body of a successful `POST /predict`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predictions: Vec<Prediction>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// POST /predict
///
/// The body is read as loose JSON so that a missing or non-string `text`
/// answers 400 with the same message as an empty one.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(body) = payload.map_err(|_| ApiError::invalid_input())?;
    let text = body
        .get("text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .ok_or_else(ApiError::invalid_input)?;

    let predictor = state.models.get()?;
    let predictions = predictor.predict(text)?;

    Ok(Json(PredictResponse { predictions }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.models.is_ready() {
        "ok"
    } else {
        "loading"
    };

    Json(HealthResponse {
        status: status.to_string(),
        module: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
