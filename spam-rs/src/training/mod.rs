//! Offline training job
//!
//! Loads the labeled SMS collection, cleans and normalizes it, compares the
//! candidate models on a seeded held-out split and fits the production
//! artifact pair.

pub mod dataset;
pub mod explore;
pub mod metrics;
pub mod pipeline;
pub mod split;

pub use dataset::{clean, load_csv, RawRecord};
pub use metrics::{evaluate, Evaluation};
pub use pipeline::{
    compare_models, normalize_corpus, train, Corpus, ModelComparison, TrainOptions, TrainReport,
};
pub use split::{train_test_split, SplitIndices};
