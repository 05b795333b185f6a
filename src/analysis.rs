//! Text analysis for symptom descriptions.
//!
//! Raw text flows through char filters (whole-string normalization) and then a
//! tokenizer. The resulting token stream is what the TF-IDF vectorizer counts.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod tokenizer;
