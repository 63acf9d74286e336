//! spam-rs: SMS spam detection
//!
//! Classifies short text messages as spam or ham with a Naive Bayes model
//! over bag-of-words or TF-IDF features.
//!
//! # Features
//!
//! - **Normalization**: lowercase, tokenize, drop symbols and stop words, stem
//! - **Vectorization**: frozen vocabulary, raw counts or smoothed TF-IDF
//! - **Classification**: multinomial, Bernoulli and Gaussian Naive Bayes
//! - **Serving**: HTML form and JSON API on axum
//! - **Training**: offline job producing the vectorizer/model artifact pair
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::config::Config;
//! use spam_rs::service::SpamService;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let service = SpamService::load(&config.artifacts)?;
//!
//!     let label = service.classify("WINNER!! You have been selected to receive a £900 prize reward!");
//!     println!("{}", label);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`text`]: Normalization pipeline
//! - [`model`]: Vectorizer, classifiers and artifact persistence
//! - [`service`]: Inference over a loaded artifact pair
//! - [`training`]: Dataset loading, evaluation and model fitting
//! - [`api`]: HTTP surface
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod text;
pub mod training;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpamError};
pub use model::{ArtifactPair, Label};
pub use service::{Prediction, SpamService};
