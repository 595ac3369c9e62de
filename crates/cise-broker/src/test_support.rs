//! Scripted port implementations for broker tests.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::{CompositeKey, MetricKind};
use serde_json::{json, Value};

use cise_genai::{GenAiError, GenAiResult, PromptRequest, TextGenerator};
use cise_media::{DownloadLink, DownloadLinkProvider, LinkMode, MediaError, MediaResult, MediaSearch};
use cise_models::SongCandidate;

type MediaErrorFactory = Box<dyn Fn() -> MediaError + Send + Sync>;

#[derive(Default)]
enum Discovery {
    #[default]
    Empty,
    Topics(Vec<String>),
    Invalid,
    Transport,
}

/// Text generator answering by prompt name.
///
/// Topic detail prompts answer `"Notes on <topic>."` unless the topic is
/// scripted to fail, to come back empty, or to be delayed.
#[derive(Default)]
pub struct ScriptedGenerator {
    discovery: Discovery,
    failing_topics: HashSet<String>,
    empty_topics: HashSet<String>,
    delays: HashMap<String, Duration>,
    responses: HashMap<&'static str, Value>,
    calls: Mutex<Vec<(String, Option<String>)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topics(mut self, topics: &[&str]) -> Self {
        self.discovery = Discovery::Topics(topics.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Discovery answers with output that does not match the topic list shape.
    pub fn invalid_discovery(mut self) -> Self {
        self.discovery = Discovery::Invalid;
        self
    }

    /// Discovery fails below the model.
    pub fn unreachable_discovery(mut self) -> Self {
        self.discovery = Discovery::Transport;
        self
    }

    pub fn failing_topic(mut self, topic: &str) -> Self {
        self.failing_topics.insert(topic.to_string());
        self
    }

    pub fn empty_topic(mut self, topic: &str) -> Self {
        self.empty_topics.insert(topic.to_string());
        self
    }

    pub fn delayed_topic(mut self, topic: &str, millis: u64) -> Self {
        self.delays.insert(topic.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn respond(mut self, prompt_name: &'static str, value: Value) -> Self {
        self.responses.insert(prompt_name, value);
        self
    }

    pub fn calls_for(&self, prompt_name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == prompt_name)
            .count()
    }

    /// Topics passed to detail prompts, in call order.
    pub fn detail_topics(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(name, topic)| (name == "topic_text").then(|| topic.clone()).flatten())
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn topic_text(&self, topic: &str) -> GenAiResult<Value> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .delays
            .get(topic)
            .copied()
            .unwrap_or(Duration::from_millis(5));
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_topics.contains(topic) {
            return Err(GenAiError::Status {
                status: 400,
                body: format!("refused {}", topic),
            });
        }
        if self.empty_topics.contains(topic) {
            return Ok(json!({ "topicText": "" }));
        }
        Ok(json!({ "topicText": format!("Notes on {}.", topic) }))
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &PromptRequest) -> GenAiResult<Value> {
        let topic = prompt.get("topicName").map(str::to_string);
        self.calls
            .lock()
            .unwrap()
            .push((prompt.name.to_string(), topic.clone()));

        match prompt.name {
            "chapter_topics" => match &self.discovery {
                Discovery::Empty => Ok(json!({ "topics": [] })),
                Discovery::Topics(topics) => Ok(json!({ "topics": topics })),
                Discovery::Invalid => Ok(json!({ "chapters": "nope" })),
                Discovery::Transport => Err(GenAiError::request_failed("connection reset")),
            },
            "topic_text" => self.topic_text(topic.as_deref().unwrap_or_default()).await,
            name => self
                .responses
                .get(name)
                .cloned()
                .ok_or(GenAiError::EmptyResponse),
        }
    }
}

/// Search port returning a fixed candidate list or error.
pub struct StubSearch {
    results: Result<Vec<SongCandidate>, MediaErrorFactory>,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl StubSearch {
    pub fn found(candidates: Vec<SongCandidate>) -> Self {
        Self {
            results: Ok(candidates),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn failing(make: impl Fn() -> MediaError + Send + Sync + 'static) -> Self {
        Self {
            results: Err(Box::new(make)),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaSearch for StubSearch {
    async fn search(&self, query: &str) -> MediaResult<Vec<SongCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.to_string());
        match &self.results {
            Ok(candidates) => Ok(candidates.clone()),
            Err(make) => Err(make()),
        }
    }
}

/// Link provider returning a fixed raw URL or error.
pub struct StubLinks {
    link: Result<String, MediaErrorFactory>,
    calls: AtomicUsize,
    requested: Mutex<Vec<(String, LinkMode)>>,
}

impl StubLinks {
    pub fn returning(raw_url: &str) -> Self {
        Self {
            link: Ok(raw_url.to_string()),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(make: impl Fn() -> MediaError + Send + Sync + 'static) -> Self {
        Self {
            link: Err(Box::new(make)),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<(String, LinkMode)> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl DownloadLinkProvider for StubLinks {
    async fn fetch_link(&self, canonical_url: &str, mode: LinkMode) -> MediaResult<DownloadLink> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .unwrap()
            .push((canonical_url.to_string(), mode));
        match &self.link {
            Ok(raw_url) => Ok(DownloadLink {
                raw_url: raw_url.clone(),
            }),
            Err(make) => Err(make()),
        }
    }
}

pub fn candidate(video_id: &str, title: &str, author: &str) -> SongCandidate {
    SongCandidate {
        video_id: video_id.to_string(),
        title: title.to_string(),
        author_name: author.to_string(),
        thumbnail_url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id),
    }
}

/// Counters captured by [`record_metrics`].
pub struct RecordedMetrics(Vec<(CompositeKey, DebugValue)>);

impl RecordedMetrics {
    /// Sum of every counter named `name` carrying all of `labels`.
    pub fn counter(&self, name: &str, labels: &[(&str, &str)]) -> u64 {
        self.0
            .iter()
            .filter(|(key, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
            .filter(|(key, _)| {
                labels
                    .iter()
                    .all(|(k, v)| key.key().labels().any(|l| l.key() == *k && l.value() == *v))
            })
            .map(|(_, value)| match value {
                DebugValue::Counter(n) => *n,
                _ => 0,
            })
            .sum()
    }
}

/// Drive `work` to completion on a current-thread runtime with a local
/// metrics recorder installed, returning its output and what it recorded.
pub fn record_metrics<F: Future>(work: F) -> (F::Output, RecordedMetrics) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let output = metrics::with_local_recorder(&recorder, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("test runtime")
            .block_on(work)
    });

    let recorded = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(key, _, _, value)| (key, value))
        .collect();
    (output, RecordedMetrics(recorded))
}
