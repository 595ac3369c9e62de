//! Text generation error types.

use thiserror::Error;

pub type GenAiResult<T> = Result<T, GenAiError>;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Empty response from generation service")]
    EmptyResponse,

    #[error("Output does not match requested shape: {0}")]
    InvalidOutput(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenAiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_output(msg: impl Into<String>) -> Self {
        Self::InvalidOutput(msg.into())
    }

    /// Whether the failure happened below the model (connection, timeout, 5xx).
    pub fn is_transport(&self) -> bool {
        match self {
            GenAiError::Network(_) | GenAiError::RequestFailed(_) => true,
            GenAiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
