//! Char filters that pre-process the text string before it is passed to the
//! tokenizer.
//!
//! # Examples
//!
//! ```
//! use anamnesis::analysis::char_filter::CharFilter;
//! use anamnesis::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let filter = LowercaseCharFilter::new();
//! assert_eq!(filter.filter("High FEVER"), "high fever");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
