//! Shared data models for the CISE study broker.
//!
//! This crate provides Serde-serializable types for:
//! - Chapter content requests and the aggregated topic notes
//! - Song queries, search candidates and resolved songs
//! - Single-call study tool requests and outputs
//! - URL helpers shared by the media adapters

pub mod content;
pub mod song;
pub mod study;
pub mod utils;

// Re-export common types
pub use content::{
    ChapterContent, ContentRequest, NotesLength, Topic, TopicContent, PLACEHOLDER_TEXT,
};
pub use song::{Song, SongCandidate, SongQuery};
pub use study::{
    ChapterOverviewRequest, Diagram, Difficulty, DoubtRequest, ImportantQuestion,
    ImportantQuestionsRequest, LearningContentRequest, PracticeQuestion, PracticeTestRequest,
    QuizQuestion, RevisionNotesRequest, TopicExplanationRequest,
};
pub use utils::{force_https, is_web_url, youtube_watch_url, UrlError};
