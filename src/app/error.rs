use thiserror::Error;

use crate::config::ConfigError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Fetch failed for {endpoint}: {cause}")]
    FetchFailed {
        endpoint: String,
        #[source]
        cause: BoxError,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown feed source: {0}")]
    UnknownSource(String),
}

impl DeckError {
    pub fn fetch_failed(endpoint: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        DeckError::FetchFailed {
            endpoint: endpoint.into(),
            cause: cause.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
