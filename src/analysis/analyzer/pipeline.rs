//! Pipeline analyzer that combines char filters with a tokenizer.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use anamnesis::analysis::analyzer::analyzer::Analyzer;
//! use anamnesis::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use anamnesis::analysis::char_filter::lowercase::LowercaseCharFilter;
//! use anamnesis::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()))
//!     .add_char_filter(Arc::new(LowercaseCharFilter::new()));
//!
//! let tokens: Vec<_> = analyzer.analyze("Night SWEATS").unwrap().collect();
//! assert_eq!(tokens[0].text, "night");
//! assert_eq!(tokens[1].text, "sweats");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer: char filters applied in order, then a tokenizer.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    name: &'static str,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            tokenizer,
            char_filters: Vec::new(),
            name: "pipeline",
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the char filters used by this analyzer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|filter| filter.name())
                    .collect::<Vec<_>>(),
            )
            .field("name", &self.name)
            .finish()
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut filtered_text = text.to_string();
        for char_filter in &self.char_filters {
            filtered_text = char_filter.filter(&filtered_text);
        }

        self.tokenizer.tokenize(&filtered_text)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
    use crate::analysis::tokenizer::regex::RegexTokenizer;

    #[test]
    fn test_pipeline_without_char_filters() {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()));
        let tokens: Vec<String> = analyzer
            .analyze("Dry Cough")
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(tokens, vec!["Dry", "Cough"]);
        assert_eq!(analyzer.name(), "pipeline");
    }

    #[test]
    fn test_char_filters_run_before_tokenizer() {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .with_name("custom");

        let tokens: Vec<String> = analyzer
            .analyze("JOINT-Pain")
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(tokens, vec!["joint", "pain"]);
        assert_eq!(analyzer.name(), "custom");
        assert_eq!(analyzer.char_filters().len(), 1);
        assert_eq!(analyzer.tokenizer().name(), "regex");
    }
}
