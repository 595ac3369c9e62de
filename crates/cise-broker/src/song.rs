//! Song resolution chain.
//!
//! A free-text query becomes a downloadable song in four steps: search for
//! a candidate, derive its canonical watch URL, ask the downloader for a
//! link, and force that link onto https. Each step needs the previous
//! step's output, so the chain is strictly sequential and stops at the
//! first failure.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, Instrument};

use cise_media::{DownloadLinkProvider, LinkMode, MediaError, MediaSearch};
use cise_models::{force_https, youtube_watch_url, Song, SongQuery};

use crate::error::{BrokerError, BrokerResult};
use crate::logging::RequestLogger;
use crate::metrics;

/// Progress of one resolution.
///
/// Transitions only move forward; `Failed` is reachable from the two
/// stages that call out to a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainStage {
    Idle,
    Searching,
    Resolved,
    LinkRequested,
    Done,
    Failed,
}

impl ChainStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainStage::Idle => "idle",
            ChainStage::Searching => "searching",
            ChainStage::Resolved => "resolved",
            ChainStage::LinkRequested => "link_requested",
            ChainStage::Done => "done",
            ChainStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ChainStage::Done | ChainStage::Failed)
    }

    pub fn can_advance_to(&self, next: ChainStage) -> bool {
        use ChainStage::*;
        matches!(
            (self, next),
            (Idle, Searching)
                | (Searching, Resolved)
                | (Resolved, LinkRequested)
                | (LinkRequested, Done)
                | (Searching, Failed)
                | (LinkRequested, Failed)
        )
    }
}

impl fmt::Display for ChainStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct ChainRun<'a> {
    stage: ChainStage,
    logger: &'a RequestLogger,
}

impl<'a> ChainRun<'a> {
    fn new(logger: &'a RequestLogger) -> Self {
        Self {
            stage: ChainStage::Idle,
            logger,
        }
    }

    fn advance(&mut self, next: ChainStage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "illegal chain transition {} -> {}",
            self.stage,
            next
        );
        debug!(
            request_id = %self.logger.request_id(),
            from = %self.stage,
            to = %next,
            "Song chain transition"
        );
        self.stage = next;
    }

    fn fail(&mut self, err: BrokerError) -> BrokerError {
        self.advance(ChainStage::Failed);
        err
    }
}

/// Resolves a free-text query into a downloadable song.
pub struct MediaResolutionChain {
    search: Arc<dyn MediaSearch>,
    links: Arc<dyn DownloadLinkProvider>,
    mode: LinkMode,
}

impl MediaResolutionChain {
    pub fn new(search: Arc<dyn MediaSearch>, links: Arc<dyn DownloadLinkProvider>) -> Self {
        Self {
            search,
            links,
            mode: LinkMode::Audio,
        }
    }

    pub fn with_mode(mut self, mode: LinkMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_ready(&self) -> bool {
        self.search.is_ready()
    }

    pub async fn resolve(&self, query: &SongQuery) -> BrokerResult<Song> {
        self.resolve_logged(query, &RequestLogger::new("resolve_song"))
            .await
    }

    pub async fn resolve_logged(&self, query: &SongQuery, logger: &RequestLogger) -> BrokerResult<Song> {
        let result = self.run(query, logger).instrument(logger.create_span()).await;

        match &result {
            Ok(song) => {
                metrics::record_song_resolution("resolved");
                logger.log_completion(&format!("'{}' by {}", song.title, song.artist));
            }
            Err(e) => {
                metrics::record_song_resolution(e.code());
                logger.log_error(&e.to_string());
            }
        }

        result
    }

    async fn run(&self, query: &SongQuery, logger: &RequestLogger) -> BrokerResult<Song> {
        if query.is_blank() {
            return Err(BrokerError::invalid_query("Song query must not be empty"));
        }
        let text = query.as_str();
        logger.log_start(&format!("query '{}'", text));

        let mut run = ChainRun::new(logger);

        run.advance(ChainStage::Searching);
        let candidates = self
            .search
            .search(text)
            .await
            .map_err(|e| run.fail(e.into()))?;

        let Some(candidate) = candidates.into_iter().next() else {
            return Err(run.fail(BrokerError::SongNotFound(text.to_string())));
        };

        let watch_url = youtube_watch_url(&candidate.video_id)
            .map_err(|e| run.fail(BrokerError::SongNotFound(format!("{}: {}", text, e))))?;
        run.advance(ChainStage::Resolved);
        logger.log_progress(&format!("Matched '{}' ({})", candidate.title, watch_url));

        run.advance(ChainStage::LinkRequested);
        let link = self
            .links
            .fetch_link(&watch_url, self.mode)
            .await
            .map_err(|e| run.fail(link_error(e)))?;

        let download_url = force_https(link.raw_url.trim()).into_owned();
        run.advance(ChainStage::Done);

        Ok(Song {
            title: candidate.title,
            artist: candidate.author_name,
            thumbnail_url: candidate.thumbnail_url,
            download_url,
        })
    }
}

/// Transport failures stay upstream errors; a downloader that answered
/// without a usable link means the link is unavailable.
fn link_error(err: MediaError) -> BrokerError {
    if err.is_transport() {
        err.into()
    } else {
        BrokerError::DownloadLinkUnavailable(err.to_string())
    }
}
