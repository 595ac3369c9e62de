//! Request and output types for the single-call study tools.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::content::NotesLength;

/// Difficulty level for notes, doubts and practice tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "Low")]
    Low,
    #[default]
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Low => "low",
            Difficulty::Medium => "medium",
            Difficulty::High => "high",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Explanation of one topic within a chapter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TopicExplanationRequest {
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub subject: String,
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub chapter: String,
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub topic_name: String,
    #[serde(default)]
    pub length: NotesLength,
}

/// Quick revision notes on a topic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct RevisionNotesRequest {
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub topic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// A student question to answer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct DoubtRequest {
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub question: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

fn default_num_questions() -> u32 {
    10
}

/// Practice test generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PracticeTestRequest {
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub topic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_num_questions")]
    #[validate(range(min = 1, max = 50))]
    pub num_questions: u32,
}

/// Important questions for a whole subject.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct ImportantQuestionsRequest {
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub subject: String,
}

/// A programming lesson on one topic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct LearningContentRequest {
    /// e.g. "If-Else Statements"
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub topic: String,
}

/// A revision overview of a whole chapter with its key diagrams.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct ChapterOverviewRequest {
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub subject: String,
    #[validate(custom(function = "crate::utils::validate_not_blank"))]
    pub chapter: String,
}

/// One multiple-choice practice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// An exam-relevant question with a short note on why it matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImportantQuestion {
    pub question: String,
    pub analysis: String,
}

/// A single quiz question with the reasoning behind its answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    /// Four possible answers
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

/// A diagram a student should know for a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub title: String,
    pub description: String,
    /// Illustrative image, e.g. https://picsum.photos/600/400
    pub image_url: String,
}
