//! Library error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalystError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("missing GEMINI_API_KEY")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("analysis service returned {status}: {body}")]
    Collaborator { status: u16, body: String },
    #[error("an analysis request is already in flight")]
    Busy,
    #[error("no action is awaiting confirmation")]
    NoPendingAction,
    #[error("no recovery banner is open")]
    RecoveryClosed,
}

impl From<std::io::Error> for AnalystError {
    fn from(err: std::io::Error) -> Self {
        AnalystError::Storage(err.to_string())
    }
}

impl From<redis::RedisError> for AnalystError {
    fn from(err: redis::RedisError) -> Self {
        AnalystError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalystError>;
