//! The inference pipeline.
//!
//! ```text
//! text → TfIdfVectorizer → LinearScorer → softmax → Ranker → enrich → predictions
//! ```
//!
//! Every stage reads only its inputs and the shared, immutable
//! [`PredictionModel`](crate::model::PredictionModel), so any number of
//! predictions can run concurrently without locking.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use anamnesis::config::AnamnesisConfig;
//! use anamnesis::inference::Predictor;
//! use anamnesis::model::PredictionModel;
//!
//! # fn main() -> anamnesis::error::Result<()> {
//! let config = AnamnesisConfig::default();
//! let model = PredictionModel::load(&config.assets, config.inference.max_features)?;
//! let predictor = Predictor::new(Arc::new(model), &config.inference)?;
//!
//! for prediction in predictor.predict("high fever and a dry cough")? {
//!     println!("{} ({:.3})", prediction.disease, prediction.confidence);
//! }
//! # Ok(())
//! # }
//! ```

pub mod enricher;
pub mod predictor;
pub mod ranker;
pub mod scorer;
pub mod softmax;
pub mod vectorizer;

pub use enricher::{Prediction, enrich};
pub use predictor::{ClassScore, Explanation, Predictor, RecognizedTerm};
pub use ranker::{RankedClass, Ranker};
pub use scorer::LinearScorer;
pub use softmax::softmax;
pub use vectorizer::{TermCounts, TfIdfVectorizer};
