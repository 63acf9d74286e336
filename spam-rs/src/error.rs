use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Corpus contains no tokens to build a vocabulary from")]
    EmptyCorpus,

    #[error("Training error: {0}")]
    Training(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Message is empty")]
    EmptyMessage,
}

pub type Result<T> = std::result::Result<T, SpamError>;
