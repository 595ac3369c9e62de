//! Error types for media lookups.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while searching or fetching links.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("Search failed: {message}")]
    SearchFailed { message: String },

    #[error("Downloader returned {status}: {body}")]
    DownloaderStatus { status: u16, body: String },

    #[error("Downloader response has no link: {0}")]
    MissingLink(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create a search failure error.
    pub fn search_failed(message: impl Into<String>) -> Self {
        Self::SearchFailed {
            message: message.into(),
        }
    }

    /// Create a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Transport or infrastructure failure, as opposed to a response that
    /// arrived but did not carry what was asked for.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            MediaError::YtDlpNotFound
                | MediaError::SearchFailed { .. }
                | MediaError::Timeout(_)
                | MediaError::Network(_)
                | MediaError::Io(_)
        )
    }
}
