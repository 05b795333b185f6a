//! Regex-based split tokenizer.
//!
//! Tokens are the gaps between matches of a separator pattern. The default
//! separator is a run of characters outside `[A-Za-z0-9_]`, which is what the
//! trained vocabulary was built against.
//!
//! Split semantics:
//! - consecutive separators collapse into one split point
//! - leading and trailing separators produce no empty tokens
//! - empty input, or input made only of separators, produces exactly one
//!   empty-string token so that the token count is never zero

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{AnamnesisError, Result};

/// Separator pattern: anything that is not an ASCII word character.
pub const NON_WORD_PATTERN: &str = r"[^A-Za-z0-9_]+";

lazy_static! {
    static ref NON_WORD: Arc<Regex> =
        Arc::new(Regex::new(NON_WORD_PATTERN).expect("non-word pattern should be valid"));
}

/// A tokenizer that splits text on matches of a separator regex.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The separator pattern
    separator: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a tokenizer that splits on runs of non-word characters.
    pub fn new() -> Self {
        RegexTokenizer {
            separator: Arc::clone(&NON_WORD),
        }
    }

    /// Create a tokenizer with a custom separator pattern.
    pub fn with_separator(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| AnamnesisError::config(format!("Invalid separator pattern: {e}")))?;

        Ok(RegexTokenizer {
            separator: Arc::new(regex),
        })
    }

    /// Get the separator pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.separator.as_str()
    }

    /// Split `text` into owned tokens.
    pub fn split(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut last_end = 0;

        for mat in self.separator.find_iter(text) {
            if mat.start() > last_end {
                tokens.push(Token::with_offsets(
                    &text[last_end..mat.start()],
                    tokens.len(),
                    last_end,
                    mat.start(),
                ));
            }
            last_end = mat.end();
        }

        if last_end < text.len() {
            tokens.push(Token::with_offsets(
                &text[last_end..],
                tokens.len(),
                last_end,
                text.len(),
            ));
        }

        if tokens.is_empty() {
            tokens.push(Token::with_offsets("", 0, 0, 0));
        }

        tokens
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(self.split(text).into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
