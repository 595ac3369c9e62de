//! API routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::handlers::{
    chapter_overview, explain_topic, generate_chapter_content, health, important_questions,
    learning_content, list_chapter_topics, practice_test, ready, resolve_song, revision_notes,
    solve_doubt,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, security_headers, RateLimiterCache,
};
use crate::state::AppState;

/// Every path the router serves.
pub mod paths {
    pub const CHAPTER_CONTENT: &str = "/api/chapters/content";
    pub const CHAPTER_TOPICS: &str = "/api/chapters/topics";
    pub const TOPIC_EXPLANATION: &str = "/api/topics/explanation";
    pub const REVISION_NOTES: &str = "/api/study/revision-notes";
    pub const DOUBTS: &str = "/api/study/doubts";
    pub const PRACTICE_TEST: &str = "/api/study/practice-test";
    pub const IMPORTANT_QUESTIONS: &str = "/api/study/important-questions";
    pub const LEARNING_CONTENT: &str = "/api/study/learning-content";
    pub const CHAPTER_OVERVIEW: &str = "/api/study/chapter-overview";
    pub const SONG_RESOLVE: &str = "/api/songs/resolve";
    pub const HEALTH: &str = "/health";
    pub const HEALTHZ: &str = "/healthz";
    pub const READY: &str = "/ready";
    pub const METRICS: &str = "/metrics";

    pub const ALL: &[&str] = &[
        CHAPTER_CONTENT,
        CHAPTER_TOPICS,
        TOPIC_EXPLANATION,
        REVISION_NOTES,
        DOUBTS,
        PRACTICE_TEST,
        IMPORTANT_QUESTIONS,
        LEARNING_CONTENT,
        CHAPTER_OVERVIEW,
        SONG_RESOLVE,
        HEALTH,
        HEALTHZ,
        READY,
        METRICS,
    ];
}

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let chapter_routes = Router::new()
        .route(paths::CHAPTER_CONTENT, post(generate_chapter_content))
        .route(paths::CHAPTER_TOPICS, post(list_chapter_topics))
        .route(paths::TOPIC_EXPLANATION, post(explain_topic));

    let study_routes = Router::new()
        .route(paths::REVISION_NOTES, post(revision_notes))
        .route(paths::DOUBTS, post(solve_doubt))
        .route(paths::PRACTICE_TEST, post(practice_test))
        .route(paths::IMPORTANT_QUESTIONS, post(important_questions))
        .route(paths::LEARNING_CONTENT, post(learning_content))
        .route(paths::CHAPTER_OVERVIEW, post(chapter_overview));

    let song_routes = Router::new().route(paths::SONG_RESOLVE, post(resolve_song));

    let rate_limiter = Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let api_routes = Router::new()
        .merge(chapter_routes)
        .merge(study_routes)
        .merge(song_routes)
        .layer(middleware::from_fn_with_state(rate_limiter, rate_limit_middleware));

    let health_routes = Router::new()
        .route(paths::HEALTH, get(health))
        .route(paths::HEALTHZ, get(health))
        .route(paths::READY, get(ready));

    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route(paths::METRICS, get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
