//! Download-link lookup against the downloader HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{MediaError, MediaResult};
use crate::port::{DownloadLink, DownloadLinkProvider, LinkMode};

const DEFAULT_BASE_URL: &str = "https://akshit-api-pwht.onrender.com";

/// Configuration for the downloader client.
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Base URL of the downloader service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            // Free-tier hosts can take a while to wake up
            timeout: Duration::from_secs(90),
        }
    }
}

impl DownloaderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("DOWNLOADER_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("DOWNLOADER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(90),
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DownloadResponse {
    #[serde(default, alias = "rawUrl", alias = "raw_url")]
    file_url: Option<String>,
}

/// Client for the downloader API.
pub struct DownloaderClient {
    http: Client,
    config: DownloaderConfig,
}

impl DownloaderClient {
    /// Create a new downloader client.
    pub fn new(config: DownloaderConfig) -> MediaResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(MediaError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> MediaResult<Self> {
        Self::new(DownloaderConfig::from_env())
    }
}

#[async_trait]
impl DownloadLinkProvider for DownloaderClient {
    async fn fetch_link(&self, canonical_url: &str, mode: LinkMode) -> MediaResult<DownloadLink> {
        let url = format!("{}/download", self.config.base_url.trim_end_matches('/'));
        debug!("Requesting {} link for {} from {}", mode, canonical_url, url);

        let response = self
            .http
            .get(&url)
            .query(&[("url", canonical_url), ("type", mode.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Downloader returned {} for {}", status, canonical_url);
            return Err(MediaError::DownloaderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: DownloadResponse = serde_json::from_str(&body)
            .map_err(|e| MediaError::malformed(format!("Downloader body is not JSON: {}", e)))?;

        match parsed.file_url.filter(|u| !u.trim().is_empty()) {
            Some(raw_url) => Ok(DownloadLink { raw_url }),
            None => {
                error!("Failed to get download URL from downloader: {}", body);
                Err(MediaError::MissingLink(body))
            }
        }
    }
}
