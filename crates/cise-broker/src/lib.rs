//! Study content and song request broker.
//!
//! This crate provides:
//! - The two-stage chapter pipeline (topic discovery, per-topic detail with
//!   failure isolation, ordered aggregation)
//! - The song resolution chain (search, canonical URL, download link, https)
//! - Single-call study tools over the text generation port
//! - Structured request logging and broker metrics

pub mod chapter;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod prompts;
pub mod song;
pub mod study;

#[cfg(test)]
pub(crate) mod test_support;

pub use chapter::{aggregate, ChapterPipeline, TopicDetailStage, TopicDiscoveryStage, TopicOutcome};
pub use config::BrokerConfig;
pub use error::{BrokerError, BrokerResult, UpstreamError};
pub use logging::RequestLogger;
pub use song::{ChainStage, MediaResolutionChain};
pub use study::StudyTools;
