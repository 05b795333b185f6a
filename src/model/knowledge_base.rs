//! Reference records keyed by class label.

use serde_json::Value;

use crate::model::artifacts::KnowledgeBaseDocument;

/// Class label to opaque detail record.
///
/// The structure of a record is never interpreted; it is returned exactly as
/// it was read.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    records: KnowledgeBaseDocument,
}

impl KnowledgeBase {
    pub fn new(records: KnowledgeBaseDocument) -> Self {
        KnowledgeBase { records }
    }

    /// Record for `class_name`, if any.
    pub fn get(&self, class_name: &str) -> Option<&Value> {
        self.records.get(class_name)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.records.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many of `class_names` have a record.
    pub fn coverage<'a, I>(&self, class_names: I) -> usize
    where
        I: IntoIterator<Item = &'a String>,
    {
        class_names
            .into_iter()
            .filter(|name| self.contains(name))
            .count()
    }
}
