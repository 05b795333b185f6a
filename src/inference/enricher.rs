//! Knowledge-base enrichment of ranked classes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::knowledge_base::KnowledgeBase;

/// One ranked diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Class label.
    pub disease: String,
    /// Softmax probability.
    pub confidence: f64,
    /// Knowledge-base record, or `None` (serialized as `null`) when the class
    /// has no record.
    pub details: Option<Value>,
}

/// Attach knowledge-base records to `(class name, confidence)` matches.
///
/// Never drops a match: output length and order equal the input's.
pub fn enrich<'a, I>(matches: I, knowledge_base: &KnowledgeBase) -> Vec<Prediction>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    matches
        .into_iter()
        .map(|(disease, confidence)| Prediction {
            disease: disease.to_string(),
            confidence,
            details: knowledge_base.get(disease).cloned(),
        })
        .collect()
}
