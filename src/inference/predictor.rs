//! End-to-end prediction over a shared model.

use std::sync::Arc;

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::config::{AnamnesisConfig, InferenceConfig};
use crate::error::{AnamnesisError, Result};
use crate::inference::enricher::{Prediction, enrich};
use crate::inference::ranker::Ranker;
use crate::inference::scorer::LinearScorer;
use crate::inference::softmax::softmax;
use crate::inference::vectorizer::TfIdfVectorizer;
use crate::model::PredictionModel;

/// A vocabulary term found in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedTerm {
    pub term: String,
    /// Feature index.
    pub index: usize,
    pub count: usize,
    /// Value of the feature after L2 normalization.
    pub weight: f64,
}

/// Score of one class in an explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub disease: String,
    pub logit: f64,
    pub probability: f64,
}

/// Intermediate artifacts of a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Every token of the split, in order.
    pub tokens: Vec<String>,
    /// TF denominator.
    pub total_tokens: usize,
    /// Recognized terms, by feature index.
    pub recognized: Vec<RecognizedTerm>,
    /// Every class, best first.
    pub classes: Vec<ClassScore>,
}

/// Runs the inference pipeline against a shared, immutable model.
///
/// `Predictor` is `Send + Sync`; wrap it in an `Arc` to share it between
/// request handlers.
pub struct Predictor {
    model: Arc<PredictionModel>,
    vectorizer: TfIdfVectorizer,
    ranker: Ranker,
    thread_pool: Arc<ThreadPool>,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("classes", &self.model.num_classes())
            .field("vectorizer", &self.vectorizer)
            .field("ranker", &self.ranker)
            .field("threads", &self.num_threads())
            .finish()
    }
}

impl Predictor {
    /// Create a predictor over `model` using the standard analyzer.
    pub fn new(model: Arc<PredictionModel>, config: &InferenceConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("anamnesis-predict-{i}"))
            .build()
            .map_err(|e| AnamnesisError::config(format!("Failed to create thread pool: {e}")))?;

        Ok(Predictor {
            model,
            vectorizer: TfIdfVectorizer::default(),
            ranker: Ranker::new(config.top_k),
            thread_pool: Arc::new(thread_pool),
        })
    }

    /// Load the model artifacts named by `config` and build a predictor.
    pub fn load(config: &AnamnesisConfig) -> Result<Self> {
        config.validate()?;
        let model = PredictionModel::load(&config.assets, config.inference.max_features)?;
        Self::new(Arc::new(model), &config.inference)
    }

    pub fn model(&self) -> &Arc<PredictionModel> {
        &self.model
    }

    /// Number of worker threads used by [`Predictor::predict_batch`].
    pub fn num_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// Number of predictions returned per input.
    pub fn top_k(&self) -> usize {
        self.ranker.k()
    }

    /// Predict the most likely diagnoses for a symptom description.
    ///
    /// Returns `min(top_k, classes)` predictions, best first. Empty text is an
    /// [`AnamnesisError::InvalidInput`]; text with no recognized terms is
    /// valid and scores on the intercepts alone.
    pub fn predict(&self, text: &str) -> Result<Vec<Prediction>> {
        Self::check_input(text)?;

        let x = self.vectorizer.transform(text, &self.model)?;
        let probs = softmax(&LinearScorer::new(&self.model).score(&x)?)?;
        let ranked = self.ranker.top_k(&probs);

        let classes = self.model.classes();
        debug!(
            "predicted {:?} for {} chars",
            ranked.first().map(|r| &classes[r.class_index]),
            text.len()
        );

        Ok(enrich(
            ranked
                .iter()
                .map(|r| (classes[r.class_index].as_str(), r.probability)),
            self.model.knowledge_base(),
        ))
    }

    /// Predict many descriptions in parallel on the predictor's thread pool.
    ///
    /// Results are in input order; each input succeeds or fails on its own.
    pub fn predict_batch<S>(&self, texts: &[S]) -> Vec<Result<Vec<Prediction>>>
    where
        S: AsRef<str> + Sync,
    {
        self.thread_pool.install(|| {
            texts
                .par_iter()
                .map(|text| self.predict(text.as_ref()))
                .collect()
        })
    }

    /// Run the pipeline and keep its intermediate results.
    pub fn explain(&self, text: &str) -> Result<Explanation> {
        Self::check_input(text)?;

        let counts = self
            .vectorizer
            .count_terms(text, self.model.vocabulary())?;
        let x = TfIdfVectorizer::weigh(&counts, &self.model);
        let logits = LinearScorer::new(&self.model).score(&x)?;
        let probs = softmax(&logits)?;

        let mut recognized: Vec<RecognizedTerm> = Vec::with_capacity(counts.known.len());
        for token in &counts.tokens {
            if let Some(index) = self.model.vocabulary().get(token)
                && !recognized.iter().any(|r| r.index == index)
            {
                recognized.push(RecognizedTerm {
                    term: token.clone(),
                    index,
                    count: counts.known.get(&index).copied().unwrap_or(0),
                    weight: x[index],
                });
            }
        }
        recognized.sort_by_key(|r| r.index);

        let classes = self.model.classes();
        let ranked = Ranker::new(classes.len()).top_k(&probs);

        Ok(Explanation {
            total_tokens: counts.total(),
            tokens: counts.tokens,
            recognized,
            classes: ranked
                .iter()
                .map(|r| ClassScore {
                    disease: classes[r.class_index].clone(),
                    logit: logits[r.class_index],
                    probability: r.probability,
                })
                .collect(),
        })
    }

    fn check_input(text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(AnamnesisError::invalid_input("Provide text."));
        }
        Ok(())
    }
}
