//! The validated, immutable prediction model.

use std::collections::{HashMap, HashSet};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::AssetsConfig;
use crate::error::{AnamnesisError, Result};
use crate::model::artifacts::{
    KnowledgeBaseDocument, ModelArtifacts, ModelCoefficients, VectorizerParams,
};
use crate::model::knowledge_base::KnowledgeBase;
use crate::model::vocabulary::{IdfTable, VocabularyIndex};

/// Everything inference needs, checked for consistency at construction.
///
/// Invariants:
/// - at least one class, and class names are unique
/// - `bias.len() == classes.len() == weights.len()`
/// - every weight row has exactly `max_features` entries
/// - every vocabulary index is `< max_features` and `< idf.len()`
/// - all weights, biases and IDF values are finite; IDF values are `>= 0`
#[derive(Debug, Clone)]
pub struct PredictionModel {
    max_features: usize,
    vocabulary: VocabularyIndex,
    idf: IdfTable,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    classes: Vec<String>,
    knowledge_base: KnowledgeBase,
}

/// A short description of a loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub classes: usize,
    pub vocabulary_size: usize,
    pub max_features: usize,
    pub knowledge_base_records: usize,
    /// Classes that have a knowledge-base record.
    pub knowledge_base_coverage: usize,
}

impl PredictionModel {
    /// Read the three artifacts from disk and validate them.
    pub fn load(assets: &AssetsConfig, max_features: usize) -> Result<Self> {
        let artifacts = ModelArtifacts::load(assets)?;
        Self::from_artifacts(
            artifacts.vectorizer,
            artifacts.coefficients,
            artifacts.knowledge_base,
            max_features,
        )
    }

    /// Validate parsed artifacts and assemble the model.
    pub fn from_artifacts(
        vectorizer: VectorizerParams,
        coefficients: ModelCoefficients,
        knowledge_base: KnowledgeBaseDocument,
        max_features: usize,
    ) -> Result<Self> {
        if max_features == 0 {
            return Err(AnamnesisError::model_load("max_features must be at least 1"));
        }

        let ModelCoefficients {
            coef,
            intercept,
            classes,
        } = coefficients;

        Self::validate_classes(&classes)?;
        Self::validate_coefficients(&coef, &intercept, classes.len(), max_features)?;
        Self::validate_vectorizer(&vectorizer, max_features)?;

        let model = PredictionModel {
            max_features,
            vocabulary: VocabularyIndex::new(vectorizer.vocabulary),
            idf: IdfTable::new(vectorizer.idf),
            weights: coef,
            bias: intercept,
            classes,
            knowledge_base: KnowledgeBase::new(knowledge_base),
        };

        let summary = model.summary();
        info!(
            "Model ready: {} classes, {} terms, {} features",
            summary.classes, summary.vocabulary_size, summary.max_features
        );
        if summary.knowledge_base_coverage < summary.classes {
            warn!(
                "{} of {} classes have no knowledge-base record",
                summary.classes - summary.knowledge_base_coverage,
                summary.classes
            );
        }

        Ok(model)
    }

    fn validate_classes(classes: &[String]) -> Result<()> {
        if classes.is_empty() {
            return Err(AnamnesisError::model_load("model has no classes"));
        }

        let mut seen = HashSet::with_capacity(classes.len());
        for class in classes {
            if !seen.insert(class.as_str()) {
                return Err(AnamnesisError::model_load(format!(
                    "duplicate class name {class:?}"
                )));
            }
        }
        Ok(())
    }

    fn validate_coefficients(
        coef: &[Vec<f64>],
        intercept: &[f64],
        n_classes: usize,
        max_features: usize,
    ) -> Result<()> {
        if coef.len() != n_classes {
            return Err(AnamnesisError::model_load(format!(
                "coef has {} rows, expected {n_classes} (one per class)",
                coef.len()
            )));
        }
        if intercept.len() != n_classes {
            return Err(AnamnesisError::model_load(format!(
                "intercept has {} entries, expected {n_classes}",
                intercept.len()
            )));
        }

        for (c, row) in coef.iter().enumerate() {
            if row.len() != max_features {
                return Err(AnamnesisError::model_load(format!(
                    "coef row {c} has {} weights, expected {max_features}",
                    row.len()
                )));
            }
            if let Some(i) = row.iter().position(|w| !w.is_finite()) {
                return Err(AnamnesisError::model_load(format!(
                    "coef[{c}][{i}] is not finite"
                )));
            }
        }

        if let Some(c) = intercept.iter().position(|b| !b.is_finite()) {
            return Err(AnamnesisError::model_load(format!(
                "intercept[{c}] is not finite"
            )));
        }
        Ok(())
    }

    fn validate_vectorizer(vectorizer: &VectorizerParams, max_features: usize) -> Result<()> {
        if vectorizer.vocabulary.len() > max_features {
            return Err(AnamnesisError::model_load(format!(
                "vocabulary has {} terms, more than max_features {max_features}",
                vectorizer.vocabulary.len()
            )));
        }

        let mut terms_by_index: HashMap<usize, &str> =
            HashMap::with_capacity(vectorizer.vocabulary.len());
        for (term, &idx) in &vectorizer.vocabulary {
            if let Some(other) = terms_by_index.insert(idx, term.as_str()) {
                return Err(AnamnesisError::model_load(format!(
                    "vocabulary index {idx} is shared by {other:?} and {term:?}"
                )));
            }
            if idx >= max_features {
                return Err(AnamnesisError::model_load(format!(
                    "vocabulary index {idx} for {term:?} is out of range (max_features {max_features})"
                )));
            }
            if idx >= vectorizer.idf.len() {
                return Err(AnamnesisError::model_load(format!(
                    "vocabulary index {idx} for {term:?} has no idf value ({} values)",
                    vectorizer.idf.len()
                )));
            }
        }

        if let Some(i) = vectorizer
            .idf
            .iter()
            .position(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(AnamnesisError::model_load(format!(
                "idf[{i}] must be finite and non-negative"
            )));
        }
        Ok(())
    }

    /// Length of feature vectors.
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    pub fn vocabulary(&self) -> &VocabularyIndex {
        &self.vocabulary
    }

    pub fn idf(&self) -> &IdfTable {
        &self.idf
    }

    /// Weight rows, one per class.
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    /// Class labels in row order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            classes: self.classes.len(),
            vocabulary_size: self.vocabulary.len(),
            max_features: self.max_features,
            knowledge_base_records: self.knowledge_base.len(),
            knowledge_base_coverage: self.knowledge_base.coverage(&self.classes),
        }
    }
}
