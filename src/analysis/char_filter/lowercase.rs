//! Lowercase char filter.
//!
//! Lowercasing happens on the whole string before tokenization, so characters
//! whose lowercase form expands (for example `İ`) are split by the tokenizer
//! exactly as they appear after case folding.

use crate::analysis::char_filter::CharFilter;

/// A char filter that applies Unicode lowercasing to the whole input.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
