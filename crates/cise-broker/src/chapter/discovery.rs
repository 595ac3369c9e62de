//! Topic discovery stage.

use std::sync::Arc;

use cise_genai::{generate_as, TextGenerator};
use cise_models::{ContentRequest, Topic};

use crate::error::{BrokerError, BrokerResult};
use crate::logging::RequestLogger;
use crate::prompts::{self, TopicList};

/// Asks the generator for the ordered topic list of a chapter.
pub struct TopicDiscoveryStage {
    generator: Arc<dyn TextGenerator>,
}

impl TopicDiscoveryStage {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Discover topics in the order the generator lists them.
    ///
    /// Blank names are dropped; duplicates are kept. The advised count for
    /// the requested length is a hint only, so any non-empty list is
    /// accepted. Transport failures surface as `Upstream`; anything else
    /// that leaves no topics is `NoTopicsGenerated`.
    pub async fn discover(
        &self,
        request: &ContentRequest,
        logger: &RequestLogger,
    ) -> BrokerResult<Vec<Topic>> {
        let prompt = prompts::chapter_topics(request);

        let list: TopicList = match generate_as(self.generator.as_ref(), &prompt).await {
            Ok(list) => list,
            Err(e) if e.is_transport() => return Err(e.into()),
            Err(e) => {
                logger.log_warning(&format!("Topic discovery failed: {}", e));
                return Err(BrokerError::NoTopicsGenerated);
            }
        };

        let topics: Vec<Topic> = list
            .topics
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .map(Topic::from)
            .collect();

        if topics.is_empty() {
            return Err(BrokerError::NoTopicsGenerated);
        }

        let advised = request.length.advised_topic_range();
        if !advised.contains(&topics.len()) {
            logger.log_warning(&format!(
                "Discovered {} topics, outside the advised {}-{} for {} notes",
                topics.len(),
                advised.start(),
                advised.end(),
                request.length
            ));
        }

        Ok(topics)
    }
}
