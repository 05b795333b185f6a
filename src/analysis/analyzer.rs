//! Analyzers combine char filters and a tokenizer into a complete text
//! processing pipeline.

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod pipeline;
pub mod standard;

pub use analyzer::Analyzer;
pub use pipeline::PipelineAnalyzer;
pub use standard::StandardAnalyzer;
