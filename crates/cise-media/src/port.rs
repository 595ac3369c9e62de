//! Media search and download-link ports.

use std::fmt;

use async_trait::async_trait;
use cise_models::SongCandidate;

use crate::error::MediaResult;

/// Free-text query in, ranked candidates out.
///
/// An empty vector means no matches; errors are reserved for transport and
/// infrastructure failures.
#[async_trait]
pub trait MediaSearch: Send + Sync {
    async fn search(&self, query: &str) -> MediaResult<Vec<SongCandidate>>;

    /// Whether the backing tool or service is available.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Variant requested from the downloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    #[default]
    Audio,
    Video,
}

impl LinkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkMode::Audio => "audio",
            LinkMode::Video => "video",
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direct link returned by the downloader, scheme untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub raw_url: String,
}

/// Canonical media URL in, direct link out.
#[async_trait]
pub trait DownloadLinkProvider: Send + Sync {
    async fn fetch_link(&self, canonical_url: &str, mode: LinkMode) -> MediaResult<DownloadLink>;
}
