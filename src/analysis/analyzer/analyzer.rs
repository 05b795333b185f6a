//! Core analyzer trait definition.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Stream
//! ```
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use anamnesis::analysis::analyzer::analyzer::Analyzer;
//! use anamnesis::analysis::token::TokenStream;
//! use anamnesis::error::Result;
//!
//! struct NothingAnalyzer;
//!
//! impl Analyzer for NothingAnalyzer {
//!     fn analyze(&self, _text: &str) -> Result<TokenStream> {
//!         Ok(Box::new(std::iter::empty()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "nothing"
//!     }
//! }
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analyzers are shared by every concurrent prediction, hence `Send + Sync`.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &'static str;
}
