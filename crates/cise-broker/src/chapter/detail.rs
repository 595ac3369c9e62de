//! Topic detail stage with per-topic failure isolation.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use cise_genai::{generate_as, TextGenerator};
use cise_models::{NotesLength, Topic, TopicContent};

use crate::error::{BrokerError, BrokerResult};
use crate::logging::RequestLogger;
use crate::metrics;
use crate::prompts::{self, TopicText};

/// Result of one topic detail call.
///
/// A failed call never aborts the chapter; it becomes a `Fallback` and is
/// rendered as placeholder text in its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicOutcome {
    Generated(String),
    Fallback { reason: String },
}

impl TopicOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, TopicOutcome::Fallback { .. })
    }

    pub fn into_content(self, topic: &Topic) -> TopicContent {
        match self {
            TopicOutcome::Generated(text) => TopicContent::generated(topic.as_str(), text),
            TopicOutcome::Fallback { .. } => TopicContent::placeholder(topic.as_str()),
        }
    }
}

/// Generates notes for each discovered topic.
pub struct TopicDetailStage {
    generator: Arc<dyn TextGenerator>,
    max_parallel: usize,
}

impl TopicDetailStage {
    pub fn new(generator: Arc<dyn TextGenerator>, max_parallel: usize) -> Self {
        Self {
            generator,
            max_parallel: max_parallel.max(1),
        }
    }

    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Generate notes for a single topic.
    ///
    /// Empty text is an error here; the caller decides whether to recover.
    pub async fn explain(
        &self,
        subject: &str,
        chapter: &str,
        topic: &Topic,
        length: NotesLength,
    ) -> BrokerResult<String> {
        let prompt = prompts::topic_text(subject, chapter, topic, length);
        let output: TopicText = generate_as(self.generator.as_ref(), &prompt).await?;

        let text = output.topic_text.trim();
        if text.is_empty() {
            return Err(BrokerError::empty_generation("topic text"));
        }
        Ok(text.to_string())
    }

    /// Run one detail call per topic, at most `max_parallel` at a time.
    ///
    /// Outcomes are returned in topic order regardless of completion order.
    pub async fn explain_all(
        &self,
        subject: &str,
        chapter: &str,
        topics: &[Topic],
        length: NotesLength,
        logger: &RequestLogger,
    ) -> Vec<TopicOutcome> {
        let semaphore = Semaphore::new(self.max_parallel);

        let futures: Vec<_> = topics
            .iter()
            .map(|topic| {
                let semaphore = &semaphore;
                async move {
                    // The semaphore is never closed, so acquire only waits.
                    let _permit = semaphore.acquire().await.ok();

                    match self.explain(subject, chapter, topic, length).await {
                        Ok(text) => {
                            metrics::record_topic_detail(false);
                            TopicOutcome::Generated(text)
                        }
                        Err(e) => {
                            let failure = BrokerError::topic_detail_failed(topic.as_str(), e.to_string());
                            logger.log_recovered(topic.as_str(), &failure.to_string());
                            metrics::record_topic_detail(true);
                            TopicOutcome::Fallback {
                                reason: e.to_string(),
                            }
                        }
                    }
                }
            })
            .collect();

        join_all(futures).await
    }
}
