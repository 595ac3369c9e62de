//! Aggregation of topic outcomes into chapter content.

use cise_models::{ChapterContent, Topic};

use super::detail::TopicOutcome;
use crate::error::{BrokerError, BrokerResult};

/// Pair each topic with its outcome, preserving discovery order.
///
/// Placeholders count as content; only an empty or misaligned outcome list
/// fails.
pub fn aggregate(topics: &[Topic], outcomes: Vec<TopicOutcome>) -> BrokerResult<ChapterContent> {
    if topics.is_empty() || outcomes.len() != topics.len() {
        return Err(BrokerError::NoContentGenerated);
    }

    let topics = topics
        .iter()
        .zip(outcomes)
        .map(|(topic, outcome)| outcome.into_content(topic))
        .collect();

    Ok(ChapterContent { topics })
}
