//! Error types for the Anamnesis library.
//!
//! All errors are represented by the [`AnamnesisError`] enum. The variants
//! that callers of the inference pipeline need to distinguish are
//! [`AnamnesisError::InvalidInput`] (bad request text),
//! [`AnamnesisError::ModelNotReady`] (the model has not finished loading) and
//! [`AnamnesisError::ModelLoad`] (the model artifacts are malformed).
//!
//! # Examples
//!
//! ```
//! use anamnesis::error::{AnamnesisError, Result};
//!
//! fn example_operation(text: &str) -> Result<()> {
//!     if text.is_empty() {
//!         return Err(AnamnesisError::invalid_input("Provide text."));
//!     }
//!     Ok(())
//! }
//!
//! assert!(example_operation("").is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Anamnesis operations.
#[derive(Error, Debug)]
pub enum AnamnesisError {
    /// I/O errors (file operations, sockets, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request text missing, empty or not a string
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The prediction model has not been constructed yet
    #[error("Model not ready")]
    ModelNotReady,

    /// Model artifacts are missing fields or violate structural invariants
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Unexpected numeric failure during inference
    #[error("Inference error: {0}")]
    Inference(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for operations that may fail with AnamnesisError.
pub type Result<T> = std::result::Result<T, AnamnesisError>;

impl AnamnesisError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        AnamnesisError::InvalidInput(msg.into())
    }

    /// Create a new model load error.
    pub fn model_load<S: Into<String>>(msg: S) -> Self {
        AnamnesisError::ModelLoad(msg.into())
    }

    /// Create a new inference error.
    pub fn inference<S: Into<String>>(msg: S) -> Self {
        AnamnesisError::Inference(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AnamnesisError::Config(msg.into())
    }

    /// Create a new server error.
    pub fn server<S: Into<String>>(msg: S) -> Self {
        AnamnesisError::Server(msg.into())
    }

    /// Whether the error is the caller's fault rather than the service's.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnamnesisError::InvalidInput(_))
    }
}

impl From<toml::de::Error> for AnamnesisError {
    fn from(err: toml::de::Error) -> Self {
        AnamnesisError::Config(err.to_string())
    }
}
