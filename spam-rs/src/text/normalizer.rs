//! Message normalizer
//!
//! Lowercases, tokenizes, filters and stems a message into the canonical
//! space-joined form used for vectorization.

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::OnceLock;

use super::stopwords;
use super::tokenizer::tokenize_words;

/// Normalization pipeline
pub struct Normalizer {
    stemmer: Stemmer,
    stop_words: HashSet<String>,
}

impl Normalizer {
    /// Create a normalizer with the English stop-word list
    pub fn new() -> Self {
        Self::with_stop_words(stopwords::ENGLISH.iter().copied())
    }

    /// Create a normalizer with a custom stop-word set
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stop_words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Check stop-word membership
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Normalized token list, in source order
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        tokenize_words(&lowered)
            .into_iter()
            .filter(|token| token.chars().all(char::is_alphanumeric))
            .filter(|token| !self.is_stop_word(token) && !stopwords::is_punctuation(token))
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect()
    }

    /// Normalized text: tokens joined by single spaces, empty if none remain
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize with the shared default (English) normalizer
pub fn normalize(text: &str) -> String {
    static DEFAULT: OnceLock<Normalizer> = OnceLock::new();
    DEFAULT.get_or_init(Normalizer::new).normalize(text)
}
