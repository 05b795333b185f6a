//! TF-IDF vectorizer for symptom text.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::error::Result;
use crate::model::PredictionModel;
use crate::model::vocabulary::VocabularyIndex;

/// Token counts of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct TermCounts {
    /// Every token of the split, recognized or not.
    pub tokens: Vec<String>,
    /// Feature index to occurrence count, for recognized tokens only.
    pub known: BTreeMap<usize, usize>,
}

impl TermCounts {
    /// The TF denominator: all tokens, including unknown ones.
    pub fn total(&self) -> usize {
        self.tokens.len()
    }
}

/// Turns text into a fixed-length, L2-normalized TF-IDF feature vector.
///
/// Term frequency is `count / total`, where `total` counts every token of the
/// split including out-of-vocabulary ones. Unknown tokens therefore shrink the
/// weight of known ones before normalization but never add a feature.
#[derive(Clone)]
pub struct TfIdfVectorizer {
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(Arc::new(StandardAnalyzer::new()))
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self { analyzer }
    }

    /// The analyzer used for tokenization.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Tokenize `document` and count the tokens the vocabulary knows.
    pub fn count_terms(&self, document: &str, vocabulary: &VocabularyIndex) -> Result<TermCounts> {
        let tokens: Vec<String> = self.analyzer.analyze(document)?.map(|t| t.text).collect();

        let mut known = BTreeMap::new();
        for token in &tokens {
            if let Some(idx) = vocabulary.get(token) {
                *known.entry(idx).or_insert(0) += 1;
            }
        }

        Ok(TermCounts { tokens, known })
    }

    /// Transform a document into a normalized TF-IDF feature vector of length
    /// `model.max_features()`.
    pub fn transform(&self, document: &str, model: &PredictionModel) -> Result<Vec<f64>> {
        let counts = self.count_terms(document, model.vocabulary())?;
        Ok(Self::weigh(&counts, model))
    }

    /// Build the feature vector from term counts.
    ///
    /// The result is either unit length or exactly zero.
    pub fn weigh(counts: &TermCounts, model: &PredictionModel) -> Vec<f64> {
        let mut vector = vec![0.0; model.max_features()];

        let total = counts.total() as f64;
        if total > 0.0 {
            for (&idx, &count) in &counts.known {
                let tf = count as f64 / total;
                vector[idx] = tf * model.idf().get(idx);
            }
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}
