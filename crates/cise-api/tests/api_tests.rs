//! API integration tests against stub ports.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use cise_api::{create_router, ApiConfig, AppState};
use cise_broker::BrokerConfig;
use cise_genai::{GenAiError, GenAiResult, PromptRequest, TextGenerator};
use cise_media::{DownloadLink, DownloadLinkProvider, LinkMode, MediaError, MediaResult, MediaSearch};
use cise_models::SongCandidate;

#[derive(Default)]
struct StubGenerator {
    topics: Vec<&'static str>,
    failing_topic: Option<&'static str>,
    responses: HashMap<&'static str, Value>,
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &PromptRequest) -> GenAiResult<Value> {
        match prompt.name {
            "chapter_topics" => Ok(json!({ "topics": self.topics })),
            "topic_text" => {
                let topic = prompt.get("topicName").unwrap_or_default();
                if Some(topic) == self.failing_topic {
                    Err(GenAiError::EmptyResponse)
                } else {
                    Ok(json!({ "topicText": format!("About {}.", topic) }))
                }
            }
            name => self.responses.get(name).cloned().ok_or(GenAiError::EmptyResponse),
        }
    }
}

struct StubSearch {
    candidates: Vec<SongCandidate>,
    ready: bool,
}

#[async_trait]
impl MediaSearch for StubSearch {
    async fn search(&self, _query: &str) -> MediaResult<Vec<SongCandidate>> {
        Ok(self.candidates.clone())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

struct StubLinks {
    raw_url: Option<&'static str>,
}

#[async_trait]
impl DownloadLinkProvider for StubLinks {
    async fn fetch_link(&self, _canonical_url: &str, _mode: LinkMode) -> MediaResult<DownloadLink> {
        match self.raw_url {
            Some(url) => Ok(DownloadLink {
                raw_url: url.to_string(),
            }),
            None => Err(MediaError::MissingLink("{}".to_string())),
        }
    }
}

struct TestApp {
    generator: StubGenerator,
    search: StubSearch,
    links: StubLinks,
    config: ApiConfig,
}

impl TestApp {
    fn new() -> Self {
        Self {
            generator: StubGenerator {
                topics: vec!["Reflection", "Refraction", "Lenses"],
                ..StubGenerator::default()
            },
            search: StubSearch {
                candidates: vec![SongCandidate {
                    video_id: "abc123".to_string(),
                    title: "Shape of You".to_string(),
                    author_name: "Ed Sheeran".to_string(),
                    thumbnail_url: "https://i.ytimg.com/vi/abc123/hqdefault.jpg".to_string(),
                }],
                ready: true,
            },
            links: StubLinks {
                raw_url: Some("http://cdn.example/x.mp3"),
            },
            config: ApiConfig::default(),
        }
    }

    fn router(self) -> Router {
        let state = AppState::from_ports(
            self.config,
            &BrokerConfig::default(),
            Arc::new(self.generator),
            Arc::new(self.search),
            Arc::new(self.links),
        );
        create_router(state, None)
    }
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = TestApp::new()
        .router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let response = TestApp::new()
        .router()
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .header("X-Request-ID", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_ready_reports_missing_search_tool() {
    let mut app = TestApp::new();
    app.search.ready = false;

    let response = app
        .router()
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_metrics_route_absent_when_disabled() {
    let response = TestApp::new()
        .router()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chapter_content_with_placeholder() {
    let mut app = TestApp::new();
    app.generator.failing_topic = Some("Refraction");

    let (status, body) = post_json(
        app.router(),
        "/api/chapters/content",
        json!({ "subject": "Physics", "chapter": "Light", "length": "Short" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let topics = body["topics"].as_array().unwrap();
    assert_eq!(topics.len(), 3);
    assert_eq!(topics[0]["topicName"], "Reflection");
    assert_eq!(topics[0]["topicText"], "About Reflection.");
    assert_eq!(topics[1]["topicName"], "Refraction");
    assert_eq!(topics[1]["topicText"], "Could not generate content for this topic.");
    assert_eq!(topics[1]["isPlaceholder"], true);
    assert_eq!(topics[2]["topicName"], "Lenses");
}

#[tokio::test]
async fn test_chapter_content_without_topics() {
    let mut app = TestApp::new();
    app.generator.topics.clear();

    let (status, body) = post_json(
        app.router(),
        "/api/chapters/content",
        json!({ "subject": "Physics", "chapter": "Light" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "no_topics_generated");
}

#[tokio::test]
async fn test_chapter_content_rejects_blank_chapter() {
    let (status, body) = post_json(
        TestApp::new().router(),
        "/api/chapters/content",
        json!({ "subject": "Physics", "chapter": " " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[tokio::test]
async fn test_chapter_topics() {
    let (status, body) = post_json(
        TestApp::new().router(),
        "/api/chapters/topics",
        json!({ "subject": "Physics", "chapter": "Light", "length": "Short" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "topics": ["Reflection", "Refraction", "Lenses"] }));
}

#[tokio::test]
async fn test_topic_explanation() {
    let (status, body) = post_json(
        TestApp::new().router(),
        "/api/topics/explanation",
        json!({ "subject": "Physics", "chapter": "Light", "topicName": "Lenses", "length": "Full" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "topicText": "About Lenses." }));
}

#[tokio::test]
async fn test_resolve_song() {
    let (status, body) = post_json(
        TestApp::new().router(),
        "/api/songs/resolve",
        json!({ "query": "Shape of You" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Shape of You");
    assert_eq!(body["artist"], "Ed Sheeran");
    assert_eq!(body["downloadUrl"], "https://cdn.example/x.mp3");
}

#[tokio::test]
async fn test_resolve_song_empty_query() {
    let (status, body) = post_json(
        TestApp::new().router(),
        "/api/songs/resolve",
        json!({ "query": "   " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_query");
}

#[tokio::test]
async fn test_resolve_song_not_found() {
    let mut app = TestApp::new();
    app.search.candidates.clear();

    let (status, body) = post_json(
        app.router(),
        "/api/songs/resolve",
        json!({ "query": "zzzz no such song" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "song_not_found");
}

#[tokio::test]
async fn test_resolve_song_without_link() {
    let mut app = TestApp::new();
    app.links.raw_url = None;

    let (status, body) = post_json(
        app.router(),
        "/api/songs/resolve",
        json!({ "query": "Shape of You" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "download_link_unavailable");
}

#[tokio::test]
async fn test_practice_test() {
    let mut app = TestApp::new();
    app.generator.responses.insert(
        "practice_test",
        json!({ "testQuestions": [
            { "question": "pH of water?", "options": ["5", "7", "9", "11"], "correctAnswer": "7" }
        ]}),
    );

    let (status, body) = post_json(
        app.router(),
        "/api/study/practice-test",
        json!({ "topic": "Acids", "difficulty": "low", "numQuestions": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["testQuestions"][0]["correctAnswer"], "7");
}

#[tokio::test]
async fn test_practice_test_count_out_of_range() {
    let (status, _) = post_json(
        TestApp::new().router(),
        "/api/study/practice-test",
        json!({ "topic": "Acids", "numQuestions": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_revision_notes_and_doubts() {
    let mut app = TestApp::new();
    app.generator
        .responses
        .insert("revision_notes", json!({ "notes": "Acids turn litmus red." }));
    app.generator
        .responses
        .insert("solve_doubt", json!({ "answer": "A measure of acidity." }));
    let router = app.router();

    let (status, body) = post_json(
        router.clone(),
        "/api/study/revision-notes",
        json!({ "topic": "Acids" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"], "Acids turn litmus red.");

    let (status, body) = post_json(router, "/api/study/doubts", json!({ "question": "What is pH?" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "A measure of acidity.");
}

#[tokio::test]
async fn test_important_questions_upstream_failure() {
    let (status, body) = post_json(
        TestApp::new().router(),
        "/api/study/important-questions",
        json!({ "subject": "Physics" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "upstream_service_error");
}

#[tokio::test]
async fn test_rate_limiting() {
    let mut app = TestApp::new();
    app.config.rate_limit_rps = 1;
    let router = app.router();

    let request = || {
        Request::builder()
            .method("POST")
            .uri("/api/songs/resolve")
            .header("content-type", "application/json")
            .header("X-Forwarded-For", "192.168.1.100")
            .body(Body::from(json!({ "query": "Shape of You" }).to_string()))
            .unwrap()
    };

    let first = router.clone().oneshot(request()).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = router.oneshot(request()).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(second.headers()["retry-after"], "1");
}

#[tokio::test]
async fn test_upstream_detail_hidden_in_production() {
    let mut app = TestApp::new();
    app.config.environment = "Production".to_string();

    let (status, body) = post_json(
        app.router(),
        "/api/study/important-questions",
        json!({ "subject": "Physics" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "upstream_service_error");
    assert_eq!(body["detail"], "An upstream service error occurred");
}

#[tokio::test]
async fn test_upstream_detail_shown_in_development() {
    let (_, body) = post_json(
        TestApp::new().router(),
        "/api/study/important-questions",
        json!({ "subject": "Physics" }),
    )
    .await;

    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("text generation"), "detail: {}", detail);
}

#[tokio::test]
async fn test_practice_test_accepts_capitalized_difficulty() {
    let mut app = TestApp::new();
    app.generator.responses.insert(
        "practice_test",
        json!({ "testQuestions": [
            { "question": "Unit of force?", "options": ["N", "J", "W", "Pa"], "correctAnswer": "N" }
        ]}),
    );

    let (status, _) = post_json(
        app.router(),
        "/api/study/practice-test",
        json!({ "topic": "Force", "difficulty": "High", "numQuestions": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_learning_content() {
    let mut app = TestApp::new();
    app.generator.responses.insert(
        "learning_content",
        json!({
            "explanation": "A for loop repeats a block a fixed number of times.",
            "codeExample": "for (int i = 0; i < 3; i++) { System.out.println(i); }",
            "quiz": {
                "question": "How many times does the loop run?",
                "options": ["2", "3", "4", "Forever"],
                "correctAnswer": "3",
                "explanation": "i takes the values 0, 1 and 2."
            }
        }),
    );

    let (status, body) = post_json(
        app.router(),
        "/api/study/learning-content",
        json!({ "topic": "For Loops" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["codeExample"].as_str().unwrap().starts_with("for (int i"));
    assert_eq!(body["quiz"]["correctAnswer"], "3");
    assert_eq!(body["quiz"]["options"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_chapter_overview() {
    let mut app = TestApp::new();
    app.generator.responses.insert(
        "chapter_overview",
        json!({
            "explanation": "The eye focuses light on the retina.",
            "diagrams": [
                { "title": "Human eye", "description": "Parts of the eye", "imageUrl": "https://picsum.photos/600/400" }
            ]
        }),
    );

    let (status, body) = post_json(
        app.router(),
        "/api/study/chapter-overview",
        json!({ "subject": "Biology", "chapter": "The Human Eye" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["diagrams"][0]["title"], "Human eye");
    assert_eq!(body["diagrams"][0]["imageUrl"], "https://picsum.photos/600/400");
}

#[tokio::test]
async fn test_unknown_api_path_is_not_found() {
    let (status, _) = post_json(
        TestApp::new().router(),
        "/api/songs/abc",
        json!({ "query": "Shape of You" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
