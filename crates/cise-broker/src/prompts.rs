//! Prompt templates and the output shapes requested from the generator.
//!
//! Templates use `{{name}}` placeholders filled by [`PromptRequest::param`].

use cise_genai::PromptRequest;
use cise_models::{
    ContentRequest, Diagram, Difficulty, ImportantQuestion, NotesLength, PracticeQuestion,
    QuizQuestion, Topic,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CHAPTER_TOPICS_TEMPLATE: &str = "You are an expert educator for the ICSE 10th grade curriculum.
List the main topics and sub-headings for the given chapter. The number of topics should depend on the desired length of the notes.

Subject: {{subject}}
Chapter: {{chapter}}
Desired Length: {{length}}

- If Length is \"Short\", list 3-4 key topics.
- If Length is \"Medium\", list 5-7 main topics.
- If Length is \"Full\", list 8-12 comprehensive topics and sub-topics.

Advised topic count for this request: {{topic_range}}.
Return only the list of topic names.";

pub const TOPIC_TEXT_TEMPLATE: &str = "You are an expert educator for the ICSE 10th grade curriculum.
Provide a clear and detailed explanation for the following topic within the given chapter.
The length and depth of the explanation should be based on the desired \"Notes Length\".
- Short: A brief summary.
- Medium: A standard explanation.
- Full: A comprehensive, in-depth explanation with examples.
Do not use markdown or special formatting. Just provide the plain text.

Subject: {{subject}}
Chapter: {{chapter}}
Topic: {{topicName}}
Notes Length: {{length}}";

pub const REVISION_NOTES_TEMPLATE: &str = "You are an expert in creating concise and effective revision notes for students.
Generate revision notes for the following topic, tailored to the specified difficulty level:

Topic: {{topic}}
Difficulty: {{difficulty}}

Ensure the notes are easy to understand, cover the key concepts, and are suitable for quick review.";

pub const DOUBT_TEMPLATE: &str = "You are a helpful assistant that answers student questions related to the ICSE 10th board exam syllabus.

Question: {{question}}
Difficulty Level: {{difficulty}}

Provide a clear and concise answer. Keep your answer brief and to the point.";

pub const PRACTICE_TEST_TEMPLATE: &str = "You are an expert educator specializing in ICSE 10th grade curriculum.
Generate a practice test for the topic \"{{topic}}\" with {{numQuestions}} questions.
The difficulty level should be {{difficulty}}.
Each question should have 4 options, with one correct answer.
Ensure that the difficulty level is appropriate for ICSE 10th grade students.
Do not include any explanations or justifications for the answers.
Only generate the test questions.";

pub const IMPORTANT_QUESTIONS_TEMPLATE: &str = "You are an expert educator and paper-setter for the ICSE 10th grade curriculum with deep knowledge of past examination trends.
Your task is to generate the top 20 most important questions for the subject: {{subject}}.

Your analysis must be based on a detailed review of previous years' question papers. The questions should be a mix from all chapters of the subject.

For each question, provide:
1. Question: The question text itself.
2. Analysis: A short reason why this question is important, such as a frequently tested concept or a similar question in past papers.";

pub const LEARNING_CONTENT_TEMPLATE: &str = "You are an expert programmer and educator specializing in teaching Java to ICSE 10th grade students.
Your task is to provide a complete learning module for a specific programming topic.

Topic: {{topic}}

1. Explanation: Provide a clear, step-by-step explanation of the topic. Use simple terms and analogies where possible.
2. Code Example: Write a simple and clean Java code example that demonstrates the topic in a practical way. The code should be complete and runnable.
3. Quiz: Create a single multiple-choice question to check understanding. Provide 4 options, one of which is correct, and a short explanation for the correct answer.";

pub const CHAPTER_OVERVIEW_TEMPLATE: &str = "You are an expert educator for the ICSE 10th grade curriculum.
Your task is to provide study materials for a specific chapter.

Subject: {{subject}}
Chapter: {{chapter}}

1. Explanation: Provide a concise but comprehensive explanation of the main topics in this chapter, suitable for quick revision.
2. Diagrams: Identify up to {{maxDiagrams}} of the most important diagrams in this chapter that a student must know for their exam. For each diagram give a clear title, a short simple description and a placeholder image URL from picsum.photos (e.g. https://picsum.photos/600/400).";

/// Most diagrams kept in a chapter overview.
pub const MAX_DIAGRAMS: usize = 4;

/// Topic discovery output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TopicList {
    /// A key topic or sub-heading from the chapter
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Topic detail output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TopicText {
    /// Plain text notes for one topic
    #[serde(rename = "topicText", default)]
    pub topic_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RevisionNotes {
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DoubtAnswer {
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PracticeTest {
    #[serde(rename = "testQuestions", default)]
    pub test_questions: Vec<PracticeQuestion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ImportantQuestions {
    /// Twenty questions with a short importance analysis each
    #[serde(default)]
    pub questions: Vec<ImportantQuestion>,
}

/// Programming lesson output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningContent {
    #[serde(default)]
    pub explanation: String,
    /// A runnable Java example
    #[serde(default)]
    pub code_example: String,
    #[serde(default)]
    pub quiz: QuizQuestion,
}

/// Chapter revision overview output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ChapterOverview {
    #[serde(default)]
    pub explanation: String,
    /// Up to four key diagrams
    #[serde(default)]
    pub diagrams: Vec<Diagram>,
}

fn format_range(length: NotesLength) -> String {
    let range = length.advised_topic_range();
    format!("{}-{}", range.start(), range.end())
}

pub fn chapter_topics(request: &ContentRequest) -> PromptRequest {
    PromptRequest::new::<TopicList>("chapter_topics", CHAPTER_TOPICS_TEMPLATE)
        .param("subject", request.subject.trim())
        .param("chapter", request.chapter.trim())
        .param("length", request.length.as_str())
        .param("topic_range", format_range(request.length))
}

pub fn topic_text(subject: &str, chapter: &str, topic: &Topic, length: NotesLength) -> PromptRequest {
    PromptRequest::new::<TopicText>("topic_text", TOPIC_TEXT_TEMPLATE)
        .param("subject", subject.trim())
        .param("chapter", chapter.trim())
        .param("topicName", topic.as_str())
        .param("length", length.as_str())
}

pub fn revision_notes(topic: &str, difficulty: Difficulty) -> PromptRequest {
    PromptRequest::new::<RevisionNotes>("revision_notes", REVISION_NOTES_TEMPLATE)
        .param("topic", topic.trim())
        .param("difficulty", difficulty.as_str())
}

pub fn doubt(question: &str, difficulty: Option<Difficulty>) -> PromptRequest {
    PromptRequest::new::<DoubtAnswer>("solve_doubt", DOUBT_TEMPLATE)
        .param("question", question.trim())
        .param(
            "difficulty",
            difficulty.map(|d| d.as_str()).unwrap_or("unspecified"),
        )
}

pub fn practice_test(topic: &str, difficulty: Difficulty, num_questions: u32) -> PromptRequest {
    PromptRequest::new::<PracticeTest>("practice_test", PRACTICE_TEST_TEMPLATE)
        .param("topic", topic.trim())
        .param("difficulty", difficulty.as_str())
        .param("numQuestions", num_questions.to_string())
}

pub fn important_questions(subject: &str) -> PromptRequest {
    PromptRequest::new::<ImportantQuestions>("important_questions", IMPORTANT_QUESTIONS_TEMPLATE)
        .param("subject", subject.trim())
}

pub fn learning_content(topic: &str) -> PromptRequest {
    PromptRequest::new::<LearningContent>("learning_content", LEARNING_CONTENT_TEMPLATE)
        .param("topic", topic.trim())
}

pub fn chapter_overview(subject: &str, chapter: &str) -> PromptRequest {
    PromptRequest::new::<ChapterOverview>("chapter_overview", CHAPTER_OVERVIEW_TEMPLATE)
        .param("subject", subject.trim())
        .param("chapter", chapter.trim())
        .param("maxDiagrams", MAX_DIAGRAMS.to_string())
}
