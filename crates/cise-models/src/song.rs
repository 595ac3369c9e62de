//! Song search and resolution models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Free-text song query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SongQuery {
    pub text: String,
}

impl SongQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Whether the query is empty once surrounding whitespace is removed.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        self.text.trim()
    }
}

impl From<&str> for SongQuery {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// A ranked search result.
///
/// The resolution chain always takes the first candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SongCandidate {
    pub video_id: String,
    pub title: String,
    pub author_name: String,
    pub thumbnail_url: String,
}

/// A resolved, downloadable song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub thumbnail_url: String,
    /// Always uses the `https` scheme.
    pub download_url: String,
}
