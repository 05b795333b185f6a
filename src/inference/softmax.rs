//! Numerically stable softmax.

use crate::error::{AnamnesisError, Result};

/// Convert logits into a probability distribution.
///
/// The maximum logit is subtracted before exponentiating. An empty input or a
/// non-finite result is an inference error; no partial output is returned.
pub fn softmax(logits: &[f64]) -> Result<Vec<f64>> {
    if logits.is_empty() {
        return Err(AnamnesisError::inference("softmax of an empty logit vector"));
    }

    let max_logit = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max_logit).exp()).collect();
    let sum: f64 = exps.iter().sum();
    let probs: Vec<f64> = exps.iter().map(|e| e / sum).collect();

    if let Some(c) = probs.iter().position(|p| !p.is_finite()) {
        return Err(AnamnesisError::inference(format!(
            "softmax produced a non-finite probability for class {c}"
        )));
    }

    Ok(probs)
}
