//! Text normalization
//!
//! Turns a raw message into the canonical normalized form consumed by the
//! vectorizer: lowercase, word tokenization, symbol and stop-word removal,
//! English stemming, single-space join. The same transform runs at training
//! time and at inference time.

pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::{normalize, Normalizer};
pub use tokenizer::{split_sentences, tokenize_words};
