//! Two-stage chapter content pipeline.
//!
//! Discovery lists the chapter's topics; the detail stage generates notes
//! for every topic concurrently, substituting placeholder text for topics
//! that fail; aggregation assembles the result in discovery order.

mod aggregate;
mod detail;
mod discovery;

pub use aggregate::aggregate;
pub use detail::{TopicDetailStage, TopicOutcome};
pub use discovery::TopicDiscoveryStage;

use std::sync::Arc;

use tracing::Instrument;
use validator::Validate;

use cise_genai::TextGenerator;
use cise_models::{ChapterContent, ContentRequest};

use crate::config::BrokerConfig;
use crate::error::BrokerResult;
use crate::logging::RequestLogger;
use crate::metrics;

/// Chapter content pipeline.
pub struct ChapterPipeline {
    discovery: TopicDiscoveryStage,
    detail: TopicDetailStage,
}

impl ChapterPipeline {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &BrokerConfig) -> Self {
        Self {
            discovery: TopicDiscoveryStage::new(Arc::clone(&generator)),
            detail: TopicDetailStage::new(generator, config.max_detail_parallel),
        }
    }

    pub fn discovery(&self) -> &TopicDiscoveryStage {
        &self.discovery
    }

    pub fn detail(&self) -> &TopicDetailStage {
        &self.detail
    }

    /// Generate topic-by-topic notes for a chapter.
    pub async fn generate(&self, request: &ContentRequest) -> BrokerResult<ChapterContent> {
        self.generate_logged(request, &RequestLogger::new("chapter_content"))
            .await
    }

    /// Same as [`generate`](Self::generate) under an existing request logger.
    pub async fn generate_logged(
        &self,
        request: &ContentRequest,
        logger: &RequestLogger,
    ) -> BrokerResult<ChapterContent> {
        let result = self.run(request, logger).instrument(logger.create_span()).await;

        match &result {
            Ok(content) => {
                metrics::record_chapter_request(if content.placeholder_count() > 0 {
                    "partial"
                } else {
                    "complete"
                });
                logger.log_completion(&format!(
                    "{} topics, {} placeholders",
                    content.len(),
                    content.placeholder_count()
                ));
            }
            Err(e) => {
                metrics::record_chapter_request(e.code());
                logger.log_error(&e.to_string());
            }
        }

        result
    }

    async fn run(&self, request: &ContentRequest, logger: &RequestLogger) -> BrokerResult<ChapterContent> {
        request.validate()?;

        logger.log_start(&format!(
            "{} / {} ({} notes)",
            request.subject.trim(),
            request.chapter.trim(),
            request.length
        ));

        let topics = self.discovery.discover(request, logger).await?;
        logger.log_progress(&format!("Discovered {} topics", topics.len()));

        let outcomes = self
            .detail
            .explain_all(
                request.subject.trim(),
                request.chapter.trim(),
                &topics,
                request.length,
                logger,
            )
            .await;

        aggregate(&topics, outcomes)
    }
}
