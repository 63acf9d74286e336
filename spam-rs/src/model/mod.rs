//! Spam classification model
//!
//! Vectorization, Naive Bayes event models and the persisted artifact pair.

pub mod artifact;
pub mod naive_bayes;
pub mod types;
pub mod vectorizer;

pub use artifact::ArtifactPair;
pub use naive_bayes::{Classifier, ModelKind, NaiveBayes};
pub use types::*;
pub use vectorizer::{Vectorizer, VectorizerKind, Vocabulary};
