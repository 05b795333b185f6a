//! Serialized model artifacts.
//!
//! These mirror the files written by the training job:
//!
//! - `vectorizer_params.json`: `{"vocabulary": {"fever": 0, ...}, "idf": [..]}`
//! - `model_coef.json`: `{"coef": [[..], ..], "intercept": [..], "classes": [..]}`
//! - `disease_db.json`: `{"Influenza": {...}, ...}`
//!
//! Parsing only checks types. Structural invariants are enforced by
//! [`PredictionModel::from_artifacts`](super::PredictionModel::from_artifacts).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AssetsConfig;
use crate::error::{AnamnesisError, Result};

/// Vocabulary and IDF table of the fitted TF-IDF vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerParams {
    /// Token to feature index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    pub idf: Vec<f64>,
}

/// Coefficients of the multinomial logistic regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCoefficients {
    /// One weight row per class.
    pub coef: Vec<Vec<f64>>,
    /// One bias per class.
    pub intercept: Vec<f64>,
    /// Class labels, in row order.
    pub classes: Vec<String>,
}

/// Class label to reference record. Records are passed through untouched.
pub type KnowledgeBaseDocument = HashMap<String, Value>;

/// The three parsed documents, not yet validated against each other.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub vectorizer: VectorizerParams,
    pub coefficients: ModelCoefficients,
    pub knowledge_base: KnowledgeBaseDocument,
}

impl ModelArtifacts {
    /// Read all three documents from disk.
    pub fn load(assets: &AssetsConfig) -> Result<Self> {
        let vectorizer: VectorizerParams = read_json(&assets.vectorizer)?;
        info!(
            "Vectorizer params loaded: {} terms, {} idf values",
            vectorizer.vocabulary.len(),
            vectorizer.idf.len()
        );

        let coefficients: ModelCoefficients = read_json(&assets.model)?;
        info!(
            "Model coefficients loaded: {} classes",
            coefficients.classes.len()
        );

        let knowledge_base: KnowledgeBaseDocument = read_json(&assets.knowledge_base)?;
        info!("Knowledge base loaded: {} records", knowledge_base.len());

        Ok(ModelArtifacts {
            vectorizer,
            coefficients,
            knowledge_base,
        })
    }
}

/// Read and deserialize one JSON document.
///
/// Every failure, including a missing file, is reported as a model load error
/// naming the file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        AnamnesisError::model_load(format!("Failed to read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        AnamnesisError::model_load(format!("Failed to parse {}: {e}", path.display()))
    })
}
