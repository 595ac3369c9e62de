//! Broker error types.

use thiserror::Error;

use cise_genai::GenAiError;
use cise_media::MediaError;

pub type BrokerResult<T> = Result<T, BrokerError>;

/// Transport or infrastructure failure reported by a port.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("text generation: {0}")]
    Generation(#[from] GenAiError),

    #[error("media: {0}")]
    Media(#[from] MediaError),
}

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Could not generate chapter topics")]
    NoTopicsGenerated,

    /// Recorded for a single topic and replaced by placeholder text; the
    /// chapter pipeline never returns it.
    #[error("Could not generate text for topic '{topic}': {reason}")]
    TopicDetailFailed { topic: String, reason: String },

    #[error("Failed to generate any content for the chapter")]
    NoContentGenerated,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No song found for '{0}'")]
    SongNotFound(String),

    #[error("The downloader service failed to provide a link: {0}")]
    DownloadLinkUnavailable(String),

    #[error("Could not generate {0}")]
    EmptyGeneration(String),

    #[error("Upstream service error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl BrokerError {
    pub fn topic_detail_failed(topic: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TopicDetailFailed {
            topic: topic.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn empty_generation(what: impl Into<String>) -> Self {
        Self::EmptyGeneration(what.into())
    }

    /// Whether the caller sent something unusable.
    pub fn is_client_error(&self) -> bool {
        matches!(self, BrokerError::InvalidQuery(_) | BrokerError::InvalidRequest(_))
    }

    /// Whether the failure is recovered inside the broker.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BrokerError::TopicDetailFailed { .. })
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            BrokerError::NoTopicsGenerated => "no_topics_generated",
            BrokerError::TopicDetailFailed { .. } => "topic_detail_failed",
            BrokerError::NoContentGenerated => "no_content_generated",
            BrokerError::InvalidQuery(_) => "invalid_query",
            BrokerError::InvalidRequest(_) => "invalid_request",
            BrokerError::SongNotFound(_) => "song_not_found",
            BrokerError::DownloadLinkUnavailable(_) => "download_link_unavailable",
            BrokerError::EmptyGeneration(_) => "empty_generation",
            BrokerError::Upstream(_) => "upstream_service_error",
        }
    }
}

impl From<GenAiError> for BrokerError {
    fn from(err: GenAiError) -> Self {
        Self::Upstream(UpstreamError::Generation(err))
    }
}

impl From<MediaError> for BrokerError {
    fn from(err: MediaError) -> Self {
        Self::Upstream(UpstreamError::Media(err))
    }
}

impl From<validator::ValidationErrors> for BrokerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidRequest(errors.to_string())
    }
}
