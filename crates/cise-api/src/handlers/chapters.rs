//! Chapter content handlers.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use cise_broker::prompts::TopicText;
use cise_models::{ChapterContent, ContentRequest, TopicExplanationRequest};

use super::request_logger;
use crate::error::ApiResult;
use crate::middleware::RequestId;
use crate::state::AppState;

/// Generate topic-by-topic notes for a chapter.
///
/// Topics whose notes could not be generated carry placeholder text and
/// `isPlaceholder: true`; the request as a whole still succeeds.
pub async fn generate_chapter_content(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<ContentRequest>,
) -> ApiResult<Json<ChapterContent>> {
    let logger = request_logger(request_id, "chapter_content");
    let content = state
        .chapters
        .generate_logged(&request, &logger)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(content))
}

#[derive(Debug, Serialize)]
pub struct ChapterTopicsResponse {
    pub topics: Vec<String>,
}

/// List a chapter's topics without generating notes.
pub async fn list_chapter_topics(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<ContentRequest>,
) -> ApiResult<Json<ChapterTopicsResponse>> {
    let logger = request_logger(request_id, "chapter_topics");
    let topics = state
        .study
        .chapter_topics(&request, &logger)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(ChapterTopicsResponse {
        topics: topics.into_iter().map(|t| t.name).collect(),
    }))
}

/// Generate notes for a single topic.
pub async fn explain_topic(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<TopicExplanationRequest>,
) -> ApiResult<Json<TopicText>> {
    let logger = request_logger(request_id, "topic_explanation");
    let topic_text = state
        .study
        .topic_explanation(&request, &logger)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(TopicText { topic_text }))
}
