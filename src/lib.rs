//! # Anamnesis
//!
//! Symptom-to-diagnosis inference over a pre-trained TF-IDF and
//! multinomial logistic regression model.
//!
//! ## Features
//!
//! - Text analysis pipeline (lowercasing, non-word splitting)
//! - Sparse TF-IDF vectorization with L2 normalization
//! - Linear scoring, softmax and top-k ranking
//! - Knowledge-base enrichment of ranked diagnoses
//! - HTTP service and command line interface

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod inference;
pub mod model;
pub mod server;

pub mod prelude {
    pub use crate::config::AnamnesisConfig;
    pub use crate::error::{AnamnesisError, Result};
    pub use crate::inference::{Prediction, Predictor};
    pub use crate::model::PredictionModel;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
