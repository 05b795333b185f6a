//! Vocabulary index and IDF table.

use std::collections::HashMap;

use ahash::AHashMap;

/// Mapping from normalized token to feature index.
#[derive(Debug, Clone, Default)]
pub struct VocabularyIndex {
    terms: AHashMap<String, usize>,
}

impl VocabularyIndex {
    /// Build an index from a token to index mapping.
    pub fn new(terms: HashMap<String, usize>) -> Self {
        VocabularyIndex {
            terms: terms.into_iter().collect(),
        }
    }

    /// Feature index of `token`, or `None` for an out-of-vocabulary token.
    pub fn get(&self, token: &str) -> Option<usize> {
        self.terms.get(token).copied()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Inverse document frequency per feature index.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    values: Vec<f64>,
}

impl IdfTable {
    pub fn new(values: Vec<f64>) -> Self {
        IdfTable { values }
    }

    /// IDF of feature `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range; a validated model guarantees every
    /// vocabulary index is covered.
    pub fn get(&self, idx: usize) -> f64 {
        self.values[idx]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
