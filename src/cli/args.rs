//! Command line argument parsing for the Anamnesis CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::AnamnesisConfig;
use crate::error::Result;

/// Anamnesis - symptom-to-diagnosis inference
#[derive(Parser, Debug, Clone)]
#[command(name = "anamnesis")]
#[command(about = "Rank likely diagnoses for a free-text symptom description")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct AnamnesisArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", env = "ANAMNESIS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Vectorizer parameters document
    #[arg(long, value_name = "FILE", env = "ANAMNESIS_VECTORIZER")]
    pub vectorizer: Option<PathBuf>,

    /// Model coefficients document
    #[arg(long, value_name = "FILE", env = "ANAMNESIS_MODEL")]
    pub model: Option<PathBuf>,

    /// Disease knowledge-base document
    #[arg(long, value_name = "FILE", env = "ANAMNESIS_KNOWLEDGE_BASE")]
    pub knowledge_base: Option<PathBuf>,

    /// Length of the feature vector the model was trained with
    #[arg(long)]
    pub max_features: Option<usize>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AnamnesisArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Resolve the configuration: flags and environment over the config
    /// file over the defaults.
    pub fn load_config(&self) -> Result<AnamnesisConfig> {
        let mut config = match &self.config {
            Some(path) => AnamnesisConfig::from_file(path)?,
            None => AnamnesisConfig::default(),
        };

        if let Some(path) = &self.vectorizer {
            config.assets.vectorizer = path.clone();
        }
        if let Some(path) = &self.model {
            config.assets.model = path.clone();
        }
        if let Some(path) = &self.knowledge_base {
            config.assets.knowledge_base = path.clone();
        }
        if let Some(max_features) = self.max_features {
            config.inference.max_features = max_features;
        }

        match &self.command {
            Command::Predict(args) => {
                if let Some(top_k) = args.top_k {
                    config.inference.top_k = top_k;
                }
            }
            Command::Batch(args) => {
                if let Some(top_k) = args.top_k {
                    config.inference.top_k = top_k;
                }
                if let Some(threads) = args.threads {
                    config.inference.thread_pool_size = Some(threads);
                }
            }
            Command::Serve(args) => {
                if let Some(host) = &args.host {
                    config.server.host = host.clone();
                }
                if let Some(port) = args.port {
                    config.server.port = port;
                }
                if let Some(dir) = &args.static_dir {
                    config.server.static_dir = dir.clone();
                }
            }
            Command::Explain(_) | Command::Validate(_) => {}
        }

        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict diagnoses for one symptom description
    Predict(PredictArgs),

    /// Predict diagnoses for every line of a file
    Batch(BatchArgs),

    /// Show how a description was vectorized and scored
    Explain(ExplainArgs),

    /// Load and validate the model artifacts
    Validate(ValidateArgs),

    /// Run the HTTP service
    Serve(ServeArgs),
}

/// Arguments for a single prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Symptom description
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Number of diagnoses to return
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

/// Arguments for batch prediction
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// File with one symptom description per line
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of diagnoses to return per line
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Number of threads to use
    #[arg(short, long)]
    pub threads: Option<usize>,
}

/// Arguments for explaining a prediction
#[derive(Parser, Debug, Clone)]
pub struct ExplainArgs {
    /// Symptom description
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for artifact validation
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Fail when a class has no knowledge-base record
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the HTTP service
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory served for paths other than the API routes
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    #[test]
    fn test_predict_command() {
        let args = AnamnesisArgs::try_parse_from([
            "anamnesis",
            "predict",
            "fever and cough",
            "--top-k",
            "5",
        ])
        .unwrap();

        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.text, "fever and cough");
            assert_eq!(predict_args.top_k, Some(5));
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_batch_command() {
        let args = AnamnesisArgs::try_parse_from([
            "anamnesis",
            "batch",
            "symptoms.txt",
            "--threads",
            "4",
        ])
        .unwrap();

        if let Command::Batch(batch_args) = args.command {
            assert_eq!(batch_args.file, PathBuf::from("symptoms.txt"));
            assert_eq!(batch_args.threads, Some(4));
            assert_eq!(batch_args.top_k, None);
        } else {
            panic!("Expected Batch command");
        }
    }

    #[test]
    fn test_serve_command() {
        let args = AnamnesisArgs::try_parse_from([
            "anamnesis",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--static-dir",
            "www",
        ])
        .unwrap();

        let config = args.load_config().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, PathBuf::from("www"));
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = AnamnesisArgs::try_parse_from(["anamnesis", "validate"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = AnamnesisArgs::try_parse_from(["anamnesis", "-vv", "validate"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = AnamnesisArgs::try_parse_from(["anamnesis", "--quiet", "validate"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            AnamnesisArgs::try_parse_from(["anamnesis", "--format", "json", "validate"]).unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));

        assert!(
            AnamnesisArgs::try_parse_from(["anamnesis", "--format", "yaml", "validate"]).is_err()
        );
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[assets]\nmodel = \"from_file.json\"\nvectorizer = \"vec_file.json\"\n\n[inference]\ntop_k = 2"
        )
        .unwrap();

        let config_path = file.path().to_string_lossy().to_string();
        let args = AnamnesisArgs::try_parse_from([
            "anamnesis",
            "--config",
            config_path.as_str(),
            "--model",
            "from_flag.json",
            "predict",
            "fever",
        ])
        .unwrap();

        let config = args.load_config().unwrap();
        assert_eq!(config.assets.model, PathBuf::from("from_flag.json"));
        assert_eq!(config.assets.vectorizer, PathBuf::from("vec_file.json"));
        assert_eq!(config.inference.top_k, 2);
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let args =
            AnamnesisArgs::try_parse_from(["anamnesis", "predict", "fever", "--top-k", "0"])
                .unwrap();
        assert!(args.load_config().is_err());
    }
}
