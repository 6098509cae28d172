//! Error types for the suggestion orchestrator.
//!
//! These errors stay inside the orchestrator boundary: every failure on the
//! remote path downgrades to the local fallback and is logged, never
//! propagated to the mapping store or the row transformer.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SuggestError {
    #[error("network error: {0}")]
    Network(String),
    #[error("remote matcher returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid response payload: {0}")]
    Payload(String),
    #[error("no upload identifier available for remote suggestions")]
    MissingDataId,
    #[error("io error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for SuggestError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for SuggestError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SuggestError>;
