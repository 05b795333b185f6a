//! Shared handler state.

use std::sync::{Arc, OnceLock};

use crate::error::{AnamnesisError, Result};
use crate::inference::Predictor;

/// Write-once holder for the predictor.
///
/// Empty until the model has been loaded and validated; after that it holds
/// the same predictor for the life of the process.
#[derive(Clone, Default)]
pub struct ModelSlot {
    inner: Arc<OnceLock<Arc<Predictor>>>,
}

impl ModelSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that is already ready.
    pub fn ready(predictor: Arc<Predictor>) -> Self {
        let slot = Self::new();
        let _ = slot.inner.set(predictor);
        slot
    }

    /// Publish the predictor. Fails if one was already published.
    pub fn publish(&self, predictor: Arc<Predictor>) -> Result<()> {
        self.inner
            .set(predictor)
            .map_err(|_| AnamnesisError::server("model was already published"))
    }

    /// The predictor, or [`AnamnesisError::ModelNotReady`].
    pub fn get(&self) -> Result<Arc<Predictor>> {
        self.inner
            .get()
            .cloned()
            .ok_or(AnamnesisError::ModelNotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }
}

impl std::fmt::Debug for ModelSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSlot")
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub models: ModelSlot,
}

impl AppState {
    pub fn new(models: ModelSlot) -> Self {
        Self { models }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::InferenceConfig;
    use crate::model::{KnowledgeBaseDocument, ModelCoefficients, PredictionModel, VectorizerParams};

    fn predictor() -> Arc<Predictor> {
        let model = PredictionModel::from_artifacts(
            VectorizerParams {
                vocabulary: HashMap::from([("fever".to_string(), 0)]),
                idf: vec![1.0],
            },
            ModelCoefficients {
                coef: vec![vec![1.0]],
                intercept: vec![0.0],
                classes: vec!["flu".to_string()],
            },
            KnowledgeBaseDocument::new(),
            1,
        )
        .unwrap();
        let config = InferenceConfig {
            max_features: 1,
            thread_pool_size: Some(1),
            ..InferenceConfig::default()
        };
        Arc::new(Predictor::new(Arc::new(model), &config).unwrap())
    }

    #[test]
    fn test_empty_slot_is_not_ready() {
        let slot = ModelSlot::new();
        assert!(!slot.is_ready());
        assert!(matches!(slot.get(), Err(AnamnesisError::ModelNotReady)));
    }

    #[test]
    fn test_publish_once() {
        let slot = ModelSlot::new();
        let clone = slot.clone();

        slot.publish(predictor()).unwrap();
        assert!(clone.is_ready());
        assert!(clone.get().is_ok());

        assert!(slot.publish(predictor()).is_err());
    }

    #[test]
    fn test_ready_slot() {
        let slot = ModelSlot::ready(predictor());
        assert!(slot.is_ready());
    }
}
