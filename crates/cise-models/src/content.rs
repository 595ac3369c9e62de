//! Chapter content models.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Text stored in a topic slot whose detail generation failed.
pub const PLACEHOLDER_TEXT: &str = "Could not generate content for this topic.";

/// Desired length of chapter notes.
///
/// The length drives two things: how many topics discovery is advised to
/// produce, and how deep each topic explanation should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum NotesLength {
    /// A brief summary per topic.
    Short,
    /// A standard explanation per topic.
    #[default]
    Medium,
    /// A comprehensive explanation with examples.
    Full,
}

impl NotesLength {
    /// All available lengths.
    pub const ALL: &'static [NotesLength] =
        &[NotesLength::Short, NotesLength::Medium, NotesLength::Full];

    /// Returns the length name as used in prompts and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotesLength::Short => "Short",
            NotesLength::Medium => "Medium",
            NotesLength::Full => "Full",
        }
    }

    /// Topic count advised to the generation service.
    ///
    /// This is a soft policy: discovery accepts whatever count comes back.
    pub fn advised_topic_range(&self) -> RangeInclusive<usize> {
        match self {
            NotesLength::Short => 3..=4,
            NotesLength::Medium => 5..=7,
            NotesLength::Full => 8..=12,
        }
    }
}

impl fmt::Display for NotesLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown notes length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown notes length: {0}")]
pub struct ParseNotesLengthError(pub String);

impl FromStr for NotesLength {
    type Err = ParseNotesLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(NotesLength::Short),
            "medium" => Ok(NotesLength::Medium),
            "full" => Ok(NotesLength::Full),
            _ => Err(ParseNotesLengthError(s.to_string())),
        }
    }
}

/// Request for topic-by-topic chapter notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct ContentRequest {
    /// Subject of the chapter, e.g. Physics.
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub subject: String,
    /// Name of the chapter.
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub chapter: String,
    /// Desired notes length.
    #[serde(default)]
    pub length: NotesLength,
}

impl ContentRequest {
    pub fn new(subject: impl Into<String>, chapter: impl Into<String>, length: NotesLength) -> Self {
        Self {
            subject: subject.into(),
            chapter: chapter.into(),
            length,
        }
    }
}

/// A topic name produced by discovery.
///
/// Names are opaque and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Topic {
    pub name: String,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<String> for Topic {
    fn from(name: String) -> Self {
        Self { name }
    }
}

impl From<&str> for Topic {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Notes for a single topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicContent {
    #[serde(rename = "topicName")]
    pub name: String,
    #[serde(rename = "topicText")]
    pub text: String,
    /// True when `text` is [`PLACEHOLDER_TEXT`] substituted for a failed topic.
    #[serde(default)]
    pub is_placeholder: bool,
}

impl TopicContent {
    /// Notes produced by the generation service.
    pub fn generated(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            is_placeholder: false,
        }
    }

    /// Placeholder notes for a topic whose generation failed.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: PLACEHOLDER_TEXT.to_string(),
            is_placeholder: true,
        }
    }
}

/// Aggregated chapter notes, one entry per discovered topic in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ChapterContent {
    pub topics: Vec<TopicContent>,
}

impl ChapterContent {
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Number of slots holding placeholder text.
    pub fn placeholder_count(&self) -> usize {
        self.topics.iter().filter(|t| t.is_placeholder).count()
    }

    /// Topic names in order.
    pub fn topic_names(&self) -> Vec<&str> {
        self.topics.iter().map(|t| t.name.as_str()).collect()
    }
}
