//! Affine scoring of feature vectors.

use crate::error::{AnamnesisError, Result};
use crate::model::PredictionModel;

/// Computes one logit per class: `bias[c] + Σ_i x[i] * weights[c][i]`.
#[derive(Debug, Clone, Copy)]
pub struct LinearScorer<'a> {
    weights: &'a [Vec<f64>],
    bias: &'a [f64],
    n_features: usize,
}

impl<'a> LinearScorer<'a> {
    /// Create a scorer over the coefficients of `model`.
    pub fn new(model: &'a PredictionModel) -> Self {
        LinearScorer {
            weights: model.weights(),
            bias: model.bias(),
            n_features: model.max_features(),
        }
    }

    /// Score a feature vector. Logits are in class order.
    ///
    /// Zero features are skipped; additions happen in ascending feature order
    /// so the result is bit-identical to the dense dot product.
    pub fn score(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.n_features {
            return Err(AnamnesisError::inference(format!(
                "feature vector has {} entries, expected {}",
                x.len(),
                self.n_features
            )));
        }

        let active: Vec<(usize, f64)> = x
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (i, *v))
            .collect();

        let logits = self
            .weights
            .iter()
            .zip(self.bias)
            .map(|(row, &bias)| {
                active
                    .iter()
                    .fold(bias, |logit, &(i, value)| logit + value * row[i])
            })
            .collect();

        Ok(logits)
    }
}
