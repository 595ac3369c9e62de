//! Application state.

use std::sync::Arc;

use cise_broker::{BrokerConfig, BrokerError, ChapterPipeline, MediaResolutionChain, StudyTools};
use cise_genai::{GeminiClient, TextGenerator};
use cise_media::{DownloadLinkProvider, DownloaderClient, MediaSearch, YtDlpSearch};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub generator: Arc<dyn TextGenerator>,
    pub chapters: Arc<ChapterPipeline>,
    pub study: Arc<StudyTools>,
    pub songs: Arc<MediaResolutionChain>,
}

impl AppState {
    /// Create new application state from environment configuration.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let generator = GeminiClient::from_env()?;
        let search = YtDlpSearch::from_env();
        let links = DownloaderClient::from_env()?;

        Ok(Self::from_ports(
            config,
            &BrokerConfig::from_env(),
            Arc::new(generator),
            Arc::new(search),
            Arc::new(links),
        ))
    }

    /// Assemble state around already-built ports.
    pub fn from_ports(
        config: ApiConfig,
        broker: &BrokerConfig,
        generator: Arc<dyn TextGenerator>,
        search: Arc<dyn MediaSearch>,
        links: Arc<dyn DownloadLinkProvider>,
    ) -> Self {
        Self {
            config,
            chapters: Arc::new(ChapterPipeline::new(Arc::clone(&generator), broker)),
            study: Arc::new(StudyTools::new(Arc::clone(&generator))),
            songs: Arc::new(MediaResolutionChain::new(search, links)),
            generator,
        }
    }

    /// Wrap a broker failure, hiding upstream details in production.
    pub fn api_error(&self, error: BrokerError) -> ApiError {
        ApiError::broker(error, self.config.is_production())
    }
}
