//! Single-call study tool handlers.

use axum::extract::State;
use axum::{Extension, Json};

use cise_broker::prompts::{
    ChapterOverview, DoubtAnswer, ImportantQuestions, LearningContent, PracticeTest, RevisionNotes,
};
use cise_models::{
    ChapterOverviewRequest, DoubtRequest, ImportantQuestionsRequest, LearningContentRequest,
    PracticeTestRequest, RevisionNotesRequest,
};

use super::request_logger;
use crate::error::ApiResult;
use crate::middleware::RequestId;
use crate::state::AppState;

pub async fn revision_notes(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<RevisionNotesRequest>,
) -> ApiResult<Json<RevisionNotes>> {
    let logger = request_logger(request_id, "revision_notes");
    let notes = state
        .study
        .revision_notes(&request, &logger)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(RevisionNotes { notes }))
}

pub async fn solve_doubt(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<DoubtRequest>,
) -> ApiResult<Json<DoubtAnswer>> {
    let logger = request_logger(request_id, "solve_doubt");
    let answer = state
        .study
        .solve_doubt(&request, &logger)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(DoubtAnswer { answer }))
}

pub async fn practice_test(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<PracticeTestRequest>,
) -> ApiResult<Json<PracticeTest>> {
    let logger = request_logger(request_id, "practice_test");
    let test_questions = state
        .study
        .practice_test(&request, &logger)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(PracticeTest { test_questions }))
}

pub async fn important_questions(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<ImportantQuestionsRequest>,
) -> ApiResult<Json<ImportantQuestions>> {
    let logger = request_logger(request_id, "important_questions");
    let questions = state
        .study
        .important_questions(&request, &logger)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(ImportantQuestions { questions }))
}

/// Programming lesson: explanation, Java example and a quiz question.
pub async fn learning_content(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<LearningContentRequest>,
) -> ApiResult<Json<LearningContent>> {
    let logger = request_logger(request_id, "learning_content");
    let content = state
        .study
        .learning_content(&request, &logger)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(content))
}

/// Chapter revision explanation with up to four key diagrams.
pub async fn chapter_overview(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<ChapterOverviewRequest>,
) -> ApiResult<Json<ChapterOverview>> {
    let logger = request_logger(request_id, "chapter_overview");
    let overview = state
        .study
        .chapter_overview(&request, &logger)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(overview))
}
