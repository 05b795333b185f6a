//! HTTP service around the predictor.
//!
//! - `POST /predict` `{"text": "..."}` → `{"predictions": [...]}`
//! - `GET /health` → `{"status": "ok" | "loading", ...}`
//! - anything else is served from the static directory
//!
//! [`serve`] loads and validates the model before binding the listener, so
//! no request is accepted for an artifact set that failed to load. A router
//! built over an empty [`ModelSlot`] answers `/predict` with 503.

pub mod errors;
pub mod handlers;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use log::{info, warn};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::config::AnamnesisConfig;
use crate::error::{AnamnesisError, Result};
use crate::inference::Predictor;

pub use errors::ApiError;
pub use state::{AppState, ModelSlot};

/// Build the application router.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(CorsLayer::permissive()).with_state(state)
}

/// Load the model, then bind and serve until shutdown.
///
/// A model load failure is returned before any socket is bound.
pub async fn serve(config: AnamnesisConfig) -> Result<()> {
    let predictor = load_predictor(config.clone()).await?;
    info!("Model loaded: {} classes", predictor.model().num_classes());

    let app = build_router(
        AppState::new(ModelSlot::ready(Arc::new(predictor))),
        Some(config.server.static_dir.as_path()),
    );

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AnamnesisError::server(format!("Failed to bind {address}: {e}")))?;
    info!("Server listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AnamnesisError::server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

/// Load the artifacts on a blocking thread.
///
/// The HTTP path only calls `predict`, so the batch pool is one thread.
async fn load_predictor(mut config: AnamnesisConfig) -> Result<Predictor> {
    config.inference.thread_pool_size = Some(1);

    tokio::task::spawn_blocking(move || Predictor::load(&config))
        .await
        .map_err(|e| AnamnesisError::server(format!("Model loader failed: {e}")))?
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn write_artifacts(dir: &Path) -> AnamnesisConfig {
        let mut config = AnamnesisConfig::default();
        config.assets.vectorizer = dir.join("vectorizer_params.json");
        config.assets.model = dir.join("model_coef.json");
        config.assets.knowledge_base = dir.join("disease_db.json");
        config.inference.max_features = 2;
        config.inference.thread_pool_size = Some(4);

        let vectorizer = json!({"vocabulary": {"fever": 0}, "idf": [1.0, 1.0]});
        let model = json!({"coef": [[1.0, 0.0]], "intercept": [0.0], "classes": ["flu"]});
        std::fs::write(&config.assets.vectorizer, vectorizer.to_string()).unwrap();
        std::fs::write(&config.assets.model, model.to_string()).unwrap();
        std::fs::write(&config.assets.knowledge_base, "{}").unwrap();
        config
    }

    #[tokio::test]
    async fn test_server_predictor_uses_single_thread() {
        let dir = TempDir::new().unwrap();
        let predictor = load_predictor(write_artifacts(dir.path())).await.unwrap();

        assert_eq!(predictor.num_threads(), 1);
        assert_eq!(predictor.predict("fever").unwrap()[0].disease, "flu");
    }

    #[tokio::test]
    async fn test_load_predictor_reports_invalid_artifacts() {
        let dir = TempDir::new().unwrap();
        let config = write_artifacts(dir.path());
        std::fs::write(&config.assets.vectorizer, "not json").unwrap();

        let err = load_predictor(config).await.unwrap_err();
        assert!(matches!(err, AnamnesisError::ModelLoad(_)));
    }
}
