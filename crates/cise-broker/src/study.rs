//! Single-call study tools.
//!
//! Each tool renders one prompt, makes one generation call and rejects
//! empty output. Unlike the chapter pipeline there is nothing to fall
//! back to, so failures propagate.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::Instrument;
use validator::Validate;

use cise_genai::{generate_as, PromptRequest, TextGenerator};
use cise_models::{
    is_web_url, ChapterOverviewRequest, ContentRequest, DoubtRequest, ImportantQuestion,
    ImportantQuestionsRequest, LearningContentRequest, PracticeQuestion, PracticeTestRequest,
    RevisionNotesRequest, Topic, TopicExplanationRequest,
};

use crate::chapter::{TopicDetailStage, TopicDiscoveryStage};
use crate::error::{BrokerError, BrokerResult};
use crate::logging::RequestLogger;
use crate::metrics;
use crate::prompts::{
    self, ChapterOverview, DoubtAnswer, ImportantQuestions, LearningContent, PracticeTest,
    RevisionNotes, MAX_DIAGRAMS,
};

pub struct StudyTools {
    generator: Arc<dyn TextGenerator>,
    discovery: TopicDiscoveryStage,
    detail: TopicDetailStage,
}

impl StudyTools {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            discovery: TopicDiscoveryStage::new(Arc::clone(&generator)),
            detail: TopicDetailStage::new(Arc::clone(&generator), 1),
            generator,
        }
    }

    /// Topic list for a chapter, without generating any notes.
    pub async fn chapter_topics(
        &self,
        request: &ContentRequest,
        logger: &RequestLogger,
    ) -> BrokerResult<Vec<Topic>> {
        tracked("chapter_topics", logger, async {
            request.validate()?;
            self.discovery.discover(request, logger).await
        })
        .await
    }

    /// Notes for one topic of a chapter.
    pub async fn topic_explanation(
        &self,
        request: &TopicExplanationRequest,
        logger: &RequestLogger,
    ) -> BrokerResult<String> {
        tracked("topic_explanation", logger, async {
            request.validate()?;
            let topic = Topic::new(request.topic_name.trim());
            self.detail
                .explain(&request.subject, &request.chapter, &topic, request.length)
                .await
        })
        .await
    }

    pub async fn revision_notes(
        &self,
        request: &RevisionNotesRequest,
        logger: &RequestLogger,
    ) -> BrokerResult<String> {
        tracked("revision_notes", logger, async {
            request.validate()?;
            let prompt = prompts::revision_notes(&request.topic, request.difficulty);
            let output: RevisionNotes = self.generate(&prompt).await?;
            non_empty(output.notes, "revision notes")
        })
        .await
    }

    pub async fn solve_doubt(&self, request: &DoubtRequest, logger: &RequestLogger) -> BrokerResult<String> {
        tracked("solve_doubt", logger, async {
            request.validate()?;
            let prompt = prompts::doubt(&request.question, request.difficulty);
            let output: DoubtAnswer = self.generate(&prompt).await?;
            non_empty(output.answer, "an answer")
        })
        .await
    }

    pub async fn practice_test(
        &self,
        request: &PracticeTestRequest,
        logger: &RequestLogger,
    ) -> BrokerResult<Vec<PracticeQuestion>> {
        tracked("practice_test", logger, async {
            request.validate()?;
            let prompt = prompts::practice_test(&request.topic, request.difficulty, request.num_questions);
            let output: PracticeTest = self.generate(&prompt).await?;
            if output.test_questions.is_empty() {
                return Err(BrokerError::empty_generation("practice test questions"));
            }
            Ok(output.test_questions)
        })
        .await
    }

    pub async fn important_questions(
        &self,
        request: &ImportantQuestionsRequest,
        logger: &RequestLogger,
    ) -> BrokerResult<Vec<ImportantQuestion>> {
        tracked("important_questions", logger, async {
            request.validate()?;
            let prompt = prompts::important_questions(&request.subject);
            let output: ImportantQuestions = self.generate(&prompt).await?;
            if output.questions.is_empty() {
                return Err(BrokerError::empty_generation("important questions"));
            }
            Ok(output.questions)
        })
        .await
    }

    /// Explanation, Java example and a one-question quiz for a programming topic.
    pub async fn learning_content(
        &self,
        request: &LearningContentRequest,
        logger: &RequestLogger,
    ) -> BrokerResult<LearningContent> {
        tracked("learning_content", logger, async {
            request.validate()?;
            let prompt = prompts::learning_content(&request.topic);
            let output: LearningContent = self.generate(&prompt).await?;

            let explanation = non_empty(output.explanation, "an explanation")?;
            let code_example = non_empty(output.code_example, "a code example")?;
            let mut quiz = output.quiz;
            quiz.question = non_empty(quiz.question, "a quiz question")?;
            quiz.options.retain(|o| !o.trim().is_empty());
            if quiz.options.is_empty() {
                return Err(BrokerError::empty_generation("quiz options"));
            }

            Ok(LearningContent {
                explanation,
                code_example,
                quiz,
            })
        })
        .await
    }

    /// Revision explanation of a chapter plus its key diagrams.
    ///
    /// At most four diagrams are kept, and a diagram whose image URL is not
    /// an absolute web URL is dropped. No diagrams at all is still a result.
    pub async fn chapter_overview(
        &self,
        request: &ChapterOverviewRequest,
        logger: &RequestLogger,
    ) -> BrokerResult<ChapterOverview> {
        tracked("chapter_overview", logger, async {
            request.validate()?;
            let prompt = prompts::chapter_overview(&request.subject, &request.chapter);
            let output: ChapterOverview = self.generate(&prompt).await?;

            let explanation = non_empty(output.explanation, "a chapter explanation")?;
            let diagrams: Vec<_> = output
                .diagrams
                .into_iter()
                .filter(|d| is_web_url(&d.image_url))
                .take(MAX_DIAGRAMS)
                .collect();
            if diagrams.is_empty() {
                logger.log_warning("Chapter overview has no usable diagrams");
            }

            Ok::<_, BrokerError>(ChapterOverview { explanation, diagrams })
        })
        .await
    }

    async fn generate<T: DeserializeOwned>(&self, prompt: &PromptRequest) -> BrokerResult<T> {
        Ok(generate_as(self.generator.as_ref(), prompt).await?)
    }
}

/// Run one tool call inside the request span and record its final outcome.
async fn tracked<T, F>(tool: &'static str, logger: &RequestLogger, work: F) -> BrokerResult<T>
where
    F: Future<Output = BrokerResult<T>>,
{
    logger.log_start(tool);
    let result = work.instrument(logger.create_span()).await;
    metrics::record_study_tool(tool, result.is_ok());

    match &result {
        Ok(_) => logger.log_completion(tool),
        Err(e) => logger.log_error(&format!("{}: {}", tool, e)),
    }
    result
}

fn non_empty(text: String, what: &str) -> BrokerResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BrokerError::empty_generation(what));
    }
    Ok(trimmed.to_string())
}
