//! Configuration for asset locations, inference parameters and the HTTP
//! service.
//!
//! Values come from (highest precedence first) CLI flags or environment
//! variables, an optional TOML file, and the defaults below.
//!
//! ```toml
//! [assets]
//! vectorizer = "vectorizer_params.json"
//! model = "model_coef.json"
//! knowledge_base = "disease_db.json"
//!
//! [inference]
//! top_k = 3
//! max_features = 5000
//!
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//! static_dir = "public"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AnamnesisError, Result};

/// Number of feature columns the vectorizer was trained with.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Number of ranked diagnoses returned per prediction.
pub const DEFAULT_TOP_K: usize = 3;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnamnesisConfig {
    /// Where the model artifacts live.
    pub assets: AssetsConfig,
    /// Inference parameters.
    pub inference: InferenceConfig,
    /// HTTP service settings.
    pub server: ServerConfig,
}

impl AnamnesisConfig {
    /// Read a configuration file in TOML format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AnamnesisError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: AnamnesisConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<()> {
        self.inference.validate()
    }
}

/// Paths of the three model artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Vectorizer document: `{vocabulary, idf}`.
    pub vectorizer: PathBuf,
    /// Model document: `{coef, intercept, classes}`.
    pub model: PathBuf,
    /// Knowledge-base document: `{className: record}`.
    pub knowledge_base: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            vectorizer: PathBuf::from("vectorizer_params.json"),
            model: PathBuf::from("model_coef.json"),
            knowledge_base: PathBuf::from("disease_db.json"),
        }
    }
}

/// Parameters of the inference pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Number of diagnoses returned per prediction.
    pub top_k: usize,

    /// Length of the feature vector; every weight row must match it.
    pub max_features: usize,

    /// Thread pool size for batch prediction.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_features: DEFAULT_MAX_FEATURES,
            thread_pool_size: None,
        }
    }
}

impl InferenceConfig {
    /// Check that the parameters are usable.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(AnamnesisError::config("top_k must be at least 1"));
        }
        if self.max_features == 0 {
            return Err(AnamnesisError::config("max_features must be at least 1"));
        }
        if self.thread_pool_size == Some(0) {
            return Err(AnamnesisError::config(
                "thread_pool_size must be at least 1",
            ));
        }
        Ok(())
    }
}

/// HTTP service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory served for any path that is not an API route.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("public"),
        }
    }
}

impl ServerConfig {
    /// The `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnamnesisConfig::default();
        assert_eq!(config.inference.top_k, 3);
        assert_eq!(config.inference.max_features, 5000);
        assert_eq!(config.assets.model, PathBuf::from("model_coef.json"));
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[inference]\ntop_k = 5\n\n[server]\nport = 8080").unwrap();

        let config = AnamnesisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.inference.top_k, 5);
        assert_eq!(config.inference.max_features, DEFAULT_MAX_FEATURES);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.assets, AssetsConfig::default());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[inference]\ntop_k = 0").unwrap();

        let err = AnamnesisConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, AnamnesisError::Config(_)));
    }

    #[test]
    fn test_malformed_file_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[inference\ntop_k = 2").unwrap();

        let err = AnamnesisConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, AnamnesisError::Config(_)));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = AnamnesisConfig::from_file("/nonexistent/anamnesis.toml").unwrap_err();
        assert!(matches!(err, AnamnesisError::Config(_)));
    }
}
