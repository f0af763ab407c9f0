//! Error types for Compass

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid score for {dimension}: {reason}")]
    InvalidScore { dimension: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn invalid_score(dimension: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidScore {
            dimension: dimension.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
