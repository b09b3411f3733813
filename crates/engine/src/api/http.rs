//! HTTP routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use storyforge_domain::{DomainError, Level, Story, StorySource, Theme, Topic};

use crate::app::App;

/// The selections the original interface showcased as one-click examples.
const EXAMPLE_SELECTIONS: [(&str, &str, &str); 4] = [
    ("arrays", "adventure", "beginner"),
    ("linked-lists", "sci-fi", "advanced"),
    ("trees", "fantasy", "beginner"),
    ("graphs", "mystery", "advanced"),
];

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/story", post(generate_story))
        .route("/api/options", get(options))
        .route("/api/examples", get(examples))
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    model_loaded: bool,
}

async fn health(State(app): State<Arc<App>>) -> Json<HealthStatus> {
    let model_loaded = app.model_ready();
    Json(HealthStatus {
        status: if model_loaded { "healthy" } else { "loading" },
        model_loaded,
    })
}

#[derive(Debug, Deserialize)]
struct StoryRequest {
    topic: String,
    theme: String,
    level: String,
}

#[derive(Serialize)]
struct StoryResponse {
    story: String,
    source: StorySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
}

impl From<Story> for StoryResponse {
    fn from(story: Story) -> Self {
        Self {
            story: story.text,
            source: story.source,
            model: story.model,
        }
    }
}

async fn generate_story(
    State(app): State<Arc<App>>,
    Json(request): Json<StoryRequest>,
) -> Result<Json<StoryResponse>, ApiError> {
    if !app.model_ready() {
        return Err(ApiError::ServiceUnavailable);
    }

    let theme: Theme = request.theme.parse()?;
    let level: Level = request.level.parse()?;

    if app.prefer_fallback() {
        let text = app
            .fallback
            .story(&request.topic, &request.theme, &request.level);
        return Ok(Json(Story::fallback(text).into()));
    }

    match app.story.generate(&request.topic, theme, level).await {
        Ok(story) => Ok(Json(story.into())),
        Err(e) => {
            tracing::warn!(
                error = %e,
                topic = %request.topic,
                "Generation failed, serving fallback story"
            );
            let text = app
                .fallback
                .story(&request.topic, &request.theme, &request.level);
            Ok(Json(Story::fallback(text).into()))
        }
    }
}

#[derive(Serialize)]
struct OptionsResponse {
    topics: Vec<&'static str>,
    themes: Vec<&'static str>,
    levels: Vec<&'static str>,
}

async fn options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        topics: Topic::ALL.iter().map(Topic::as_str).collect(),
        themes: Theme::ALL.iter().map(Theme::as_str).collect(),
        levels: Level::ALL.iter().map(Level::as_str).collect(),
    })
}

#[derive(Serialize)]
struct ExampleSelection {
    topic: &'static str,
    theme: &'static str,
    level: &'static str,
}

async fn examples() -> Json<Vec<ExampleSelection>> {
    Json(
        EXAMPLE_SELECTIONS
            .iter()
            .map(|&(topic, theme, level)| ExampleSelection {
                topic,
                theme,
                level,
            })
            .collect(),
    )
}

pub enum ApiError {
    BadRequest(String),
    ServiceUnavailable,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::ServiceUnavailable => (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                "Story model is still loading",
            )
                .into_response(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::infrastructure::ports::{
        Completion, CompletionRequest, SamplingOptions, TextGenError, TextGenPort,
    };
    use crate::prompt_templates::PromptTemplates;

    struct EchoingPort;

    #[async_trait]
    impl TextGenPort for EchoingPort {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<Completion, TextGenError> {
            let reply = "Captain Vega stared at the row of cargo pods, each tagged with an \
                         index, and understood instantly which one held the antidote. The \
                         takeaway: position-addressed storage makes retrieval constant time.";
            Ok(Completion {
                text: format!("{}\n\n{}", request.prompt, reply),
                model: "mock-model".to_string(),
            })
        }

        async fn warmup(&self) -> Result<(), TextGenError> {
            Ok(())
        }
    }

    struct FailingPort;

    #[async_trait]
    impl TextGenPort for FailingPort {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<Completion, TextGenError> {
            Err(TextGenError::RequestFailed("backend down".to_string()))
        }

        async fn warmup(&self) -> Result<(), TextGenError> {
            Err(TextGenError::RequestFailed("backend down".to_string()))
        }
    }

    fn app_with(llm: Arc<dyn TextGenPort>, ready: bool, prefer_fallback: bool) -> Router {
        let app = Arc::new(App::new(
            llm,
            PromptTemplates::default(),
            SamplingOptions::default(),
            prefer_fallback,
        ));
        if ready {
            app.mark_model_ready();
        }
        routes().with_state(app)
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_story(router: Router, body: serde_json::Value) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/story")
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
        (status, bytes.to_vec())
    }

    fn selection(topic: &str, theme: &str, level: &str) -> serde_json::Value {
        serde_json::json!({ "topic": topic, "theme": theme, "level": level })
    }

    #[tokio::test]
    async fn health_reports_loading_until_model_is_ready() {
        let router = app_with(Arc::new(EchoingPort), false, false);
        let (status, body) = get_json(router, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "loading");
        assert_eq!(body["model_loaded"], false);

        let router = app_with(Arc::new(EchoingPort), true, false);
        let (status, body) = get_json(router, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_loaded"], true);
    }

    #[tokio::test]
    async fn story_requests_are_refused_before_model_loads() {
        let router = app_with(Arc::new(EchoingPort), false, false);
        let (status, _) =
            post_story(router, selection("arrays", "adventure", "beginner")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unknown_theme_is_rejected() {
        let router = app_with(Arc::new(EchoingPort), true, false);
        let (status, body) = post_story(router, selection("arrays", "western", "beginner")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("western"));
    }

    #[tokio::test]
    async fn unknown_level_is_rejected() {
        let router = app_with(Arc::new(EchoingPort), true, false);
        let (status, _) = post_story(router, selection("arrays", "adventure", "expert")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn successful_generation_returns_tagged_story() {
        let router = app_with(Arc::new(EchoingPort), true, false);
        let (status, body) =
            post_story(router, selection("arrays", "sci-fi", "beginner")).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["source"], "generated");
        assert_eq!(json["model"], "mock-model");
        assert!(json["story"].as_str().unwrap().contains("cargo pods"));
    }

    #[tokio::test]
    async fn generation_failure_degrades_to_fallback_story() {
        let router = app_with(Arc::new(FailingPort), true, false);
        let (status, body) =
            post_story(router, selection("arrays", "adventure", "beginner")).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["source"], "fallback");
        assert!(json.get("model").is_none());
        assert!(json["story"].as_str().unwrap().contains("treasure chests"));
    }

    #[tokio::test]
    async fn prefer_fallback_never_touches_the_model() {
        // FailingPort would error if the handler called it
        let router = app_with(Arc::new(FailingPort), true, true);
        let (status, body) =
            post_story(router, selection("linked-lists", "sci-fi", "advanced")).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["source"], "fallback");
    }

    #[tokio::test]
    async fn options_lists_the_fixed_choice_sets() {
        let router = app_with(Arc::new(EchoingPort), true, false);
        let (status, body) = get_json(router, "/api/options").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["topics"].as_array().unwrap().len(), 8);
        assert!(body["themes"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("sci-fi")));
        assert_eq!(body["levels"], serde_json::json!(["beginner", "advanced"]));
    }

    #[tokio::test]
    async fn examples_returns_the_curated_selections() {
        let router = app_with(Arc::new(EchoingPort), true, false);
        let (status, body) = get_json(router, "/api/examples").await;
        assert_eq!(status, StatusCode::OK);
        let examples = body.as_array().unwrap();
        assert_eq!(examples.len(), 4);
        assert_eq!(examples[0]["topic"], "arrays");
        assert_eq!(examples[3]["theme"], "mystery");
    }
}
