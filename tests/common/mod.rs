#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Value, json};

use anamnesis::config::{AnamnesisConfig, AssetsConfig, InferenceConfig};
use anamnesis::error::Result;
use anamnesis::inference::Predictor;
use anamnesis::model::{
    KnowledgeBaseDocument, ModelCoefficients, PredictionModel, VectorizerParams,
};

pub const TOY_MAX_FEATURES: usize = 5;

pub fn toy_vectorizer() -> VectorizerParams {
    VectorizerParams {
        vocabulary: HashMap::from([("fever".to_string(), 0), ("cough".to_string(), 1)]),
        idf: vec![1.0, 1.0, 0.0, 0.0, 0.0],
    }
}

pub fn toy_coefficients() -> ModelCoefficients {
    ModelCoefficients {
        coef: vec![vec![2.0, 1.0, 0.0, 0.0, 0.0], vec![0.0, 2.0, 0.0, 0.0, 0.0]],
        intercept: vec![0.0, 0.0],
        classes: vec!["flu".to_string(), "cold".to_string()],
    }
}

pub fn toy_knowledge_base() -> KnowledgeBaseDocument {
    KnowledgeBaseDocument::from([(
        "flu".to_string(),
        json!({"description": "Influenza", "precautions": ["rest", "fluids"]}),
    )])
}

pub fn toy_model() -> Result<PredictionModel> {
    PredictionModel::from_artifacts(
        toy_vectorizer(),
        toy_coefficients(),
        toy_knowledge_base(),
        TOY_MAX_FEATURES,
    )
}

pub fn toy_inference_config(top_k: usize) -> InferenceConfig {
    InferenceConfig {
        top_k,
        max_features: TOY_MAX_FEATURES,
        thread_pool_size: Some(2),
    }
}

pub fn toy_predictor(top_k: usize) -> Result<Predictor> {
    Predictor::new(Arc::new(toy_model()?), &toy_inference_config(top_k))
}

/// Write the toy artifacts as JSON files under `dir` and return a config
/// pointing at them.
pub fn write_toy_artifacts(dir: &Path) -> AnamnesisConfig {
    write_artifacts(
        dir,
        serde_json::to_value(toy_vectorizer()).unwrap(),
        serde_json::to_value(toy_coefficients()).unwrap(),
        serde_json::to_value(toy_knowledge_base()).unwrap(),
    )
}

pub fn write_artifacts(
    dir: &Path,
    vectorizer: Value,
    model: Value,
    knowledge_base: Value,
) -> AnamnesisConfig {
    let assets = AssetsConfig {
        vectorizer: dir.join("vectorizer_params.json"),
        model: dir.join("model_coef.json"),
        knowledge_base: dir.join("disease_db.json"),
    };
    fs::write(&assets.vectorizer, vectorizer.to_string()).unwrap();
    fs::write(&assets.model, model.to_string()).unwrap();
    fs::write(&assets.knowledge_base, knowledge_base.to_string()).unwrap();

    AnamnesisConfig {
        assets,
        inference: toy_inference_config(3),
        ..AnamnesisConfig::default()
    }
}
