//! The immutable prediction model and the artifacts it is built from.
//!
//! A [`PredictionModel`] is constructed once, from three JSON documents, and
//! validated before anything is allowed to run inference against it. After
//! construction it is never mutated and is shared read-only between threads.

pub mod artifacts;
pub mod knowledge_base;
pub mod prediction_model;
pub mod vocabulary;

pub use artifacts::{KnowledgeBaseDocument, ModelArtifacts, ModelCoefficients, VectorizerParams};
pub use knowledge_base::KnowledgeBase;
pub use prediction_model::{ModelSummary, PredictionModel};
pub use vocabulary::{IdfTable, VocabularyIndex};
