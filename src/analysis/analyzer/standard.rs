//! Standard analyzer for symptom descriptions.
//!
//! # Pipeline
//!
//! 1. LowercaseCharFilter (whole string)
//! 2. RegexTokenizer (split on runs of non-word characters)
//!
//! No stop words are removed here: the vocabulary already excludes them, and
//! every token, known or not, has to be counted.
//!
//! # Examples
//!
//! ```
//! use anamnesis::analysis::analyzer::analyzer::Analyzer;
//! use anamnesis::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("I have a High fever.").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 5);
//! assert_eq!(tokens[3].text, "high");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// The analyzer the prediction pipeline uses by default.
#[derive(Clone, Debug)]
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer.
    pub fn new() -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .with_name("standard");

        StandardAnalyzer { inner: analyzer }
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Default for StandardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        StandardAnalyzer::new()
            .analyze(text)
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_standard_analyzer() {
        assert_eq!(texts("Fever cough FEVER"), vec!["fever", "cough", "fever"]);
    }

    #[test]
    fn test_standard_analyzer_empty() {
        assert_eq!(texts(""), vec![""]);
        assert_eq!(texts("..."), vec![""]);
    }

    #[test]
    fn test_lowercase_before_split() {
        // 'İ' lowercases to "i\u{307}"; the combining dot is a separator.
        assert_eq!(texts("İTCH"), vec!["i", "tch"]);
    }
}
