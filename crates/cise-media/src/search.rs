//! Song search using yt-dlp.
//!
//! Runs `yt-dlp --dump-json --flat-playlist "ytsearchN:<query>"`, which prints
//! one JSON object per result in rank order.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info, warn};

use cise_models::SongCandidate;

use crate::error::{MediaError, MediaResult};
use crate::port::MediaSearch;

/// Search configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// yt-dlp executable name or path
    pub binary: String,
    /// Number of results requested from the search backend
    pub max_results: u32,
    /// Timeout for a single search
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            binary: "yt-dlp".to_string(),
            max_results: 5,
            timeout: Duration::from_secs(30),
        }
    }
}

impl SearchConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            binary: std::env::var("YTDLP_BINARY").unwrap_or_else(|_| "yt-dlp".to_string()),
            max_results: std::env::var("SEARCH_MAX_RESULTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            timeout: Duration::from_secs(
                std::env::var("SEARCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

/// One flat-playlist entry as printed by yt-dlp.
#[derive(Debug, Deserialize)]
struct YtDlpEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    thumbnails: Vec<YtDlpThumbnail>,
}

#[derive(Debug, Deserialize)]
struct YtDlpThumbnail {
    url: String,
}

impl YtDlpEntry {
    fn into_candidate(self) -> Option<SongCandidate> {
        let video_id = self.id.filter(|id| !id.trim().is_empty())?;

        // yt-dlp lists thumbnails smallest first
        let thumbnail_url = self
            .thumbnail
            .or_else(|| self.thumbnails.into_iter().last().map(|t| t.url))
            .unwrap_or_else(|| format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id));

        Some(SongCandidate {
            title: self.title.unwrap_or_default(),
            author_name: self.channel.or(self.uploader).unwrap_or_default(),
            thumbnail_url,
            video_id,
        })
    }
}

/// Parse yt-dlp `--dump-json` output into candidates, preserving rank order.
///
/// Entries without an id are skipped. A line that is not JSON is an error.
pub fn parse_search_output(stdout: &str) -> MediaResult<Vec<SongCandidate>> {
    let mut candidates = Vec::new();
    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let entry: YtDlpEntry = serde_json::from_str(line)?;
        match entry.into_candidate() {
            Some(candidate) => candidates.push(candidate),
            None => debug!("Skipping search entry without id"),
        }
    }
    Ok(candidates)
}

/// [`MediaSearch`] backed by the yt-dlp CLI.
pub struct YtDlpSearch {
    config: SearchConfig,
}

impl YtDlpSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(SearchConfig::from_env())
    }

    fn search_term(&self, query: &str) -> String {
        format!("ytsearch{}:{}", self.config.max_results, query)
    }
}

#[async_trait]
impl MediaSearch for YtDlpSearch {
    async fn search(&self, query: &str) -> MediaResult<Vec<SongCandidate>> {
        which::which(&self.config.binary).map_err(|_| MediaError::YtDlpNotFound)?;

        info!("Searching for \"{}\" using yt-dlp", query);

        let child = Command::new(&self.config.binary)
            .args([
                "--dump-json",
                "--flat-playlist",
                "--no-warnings",
                "--skip-download",
            ])
            .arg(self.search_term(query))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MediaError::search_failed(format!("Failed to spawn yt-dlp: {}", e)))?;

        let output = tokio::time::timeout(self.config.timeout, child.wait_with_output())
            .await
            .map_err(|_| MediaError::Timeout(self.config.timeout.as_secs()))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("yt-dlp search failed: {}", stderr.trim());
            return Err(MediaError::search_failed(format!(
                "yt-dlp exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let candidates = parse_search_output(&String::from_utf8_lossy(&output.stdout))?;
        info!("Search for \"{}\" returned {} candidates", query, candidates.len());
        Ok(candidates)
    }

    fn is_ready(&self) -> bool {
        which::which(&self.config.binary).is_ok()
    }
}
