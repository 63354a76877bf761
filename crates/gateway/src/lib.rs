//! HTTP gateway for ASKBOT.
//!
//! Exposes the ask endpoint consumed by the web front end, a health check,
//! and the embedded static chat page. Built on Axum.
//!
//! - `POST /ask`    — `{"question": "..."}` in, `{"answer": "..."}` out;
//!   200 on success, 400 for a blank question, 503 while the knowledge
//!   base is empty, 500 when the model call fails.
//! - `GET /health`  — status and version.
//! - `GET /`        — the embedded front end.

pub mod frontend;

use askbot_answer::{AnswerError, AnswerService, prompt};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

/// Shared application state.
///
/// The answer service carries the immutable knowledge snapshot, so state
/// is read-only after startup and needs no lock.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnswerService>,
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ask", post(ask_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .merge(frontend::frontend_router())
        // The front end may be served from another origin during development.
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
pub async fn start(
    host: &str,
    port: u16,
    service: Arc<AnswerService>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{host}:{port}");
    let app = build_router(AppState { service });

    info!(addr = %addr, "gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Deserialize)]
struct AskRequest {
    #[serde(default)]
    question: String,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn ask_handler(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> (StatusCode, Json<AskResponse>) {
    match state.service.answer(&payload.question).await {
        Ok(answer) => (StatusCode::OK, Json(AskResponse { answer })),
        Err(AnswerError::EmptyQuestion) => (
            StatusCode::BAD_REQUEST,
            Json(AskResponse {
                answer: prompt::EMPTY_QUESTION_ANSWER.into(),
            }),
        ),
        Err(AnswerError::NoKnowledge) => {
            warn!("ask request while the knowledge base is empty");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(AskResponse {
                    answer: prompt::NO_KNOWLEDGE_ANSWER.into(),
                }),
            )
        }
        Err(AnswerError::Provider(e)) => {
            error!(error = %e, "model call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AskResponse {
                    answer: prompt::MODEL_FAILURE_ANSWER.into(),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askbot_core::error::ProviderError;
    use askbot_core::faq::{KnowledgeBase, QaPair};
    use askbot_core::provider::{CompletionRequest, CompletionResponse, Provider};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct MockProvider {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(text) => Ok(CompletionResponse {
                    text: text.into(),
                    model: request.model,
                }),
                None => Err(ProviderError::Network("connection refused".into())),
            }
        }
    }

    fn kb() -> KnowledgeBase {
        KnowledgeBase::new(vec![QaPair::new("Qual a idade mínima?", "16 anos.")])
    }

    fn app_with(provider: Arc<MockProvider>, knowledge: KnowledgeBase) -> Router {
        let service = Arc::new(AnswerService::new(
            provider,
            "gemini-1.5-flash-latest",
            knowledge,
        ));
        build_router(AppState { service })
    }

    fn ask_request(question: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ask")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "question": question }).to_string(),
            ))
            .unwrap()
    }

    async fn answer_body(response: axum::response::Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        value["answer"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn ask_returns_the_model_answer() {
        let provider = Arc::new(MockProvider {
            reply: Some("A idade mínima é 16 anos."),
            calls: AtomicUsize::new(0),
        });
        let app = app_with(provider.clone(), kb());

        let response = app.oneshot(ask_request("Qual a idade mínima?")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(answer_body(response).await, "A idade mínima é 16 anos.");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_question_is_400_with_no_model_call() {
        let provider = Arc::new(MockProvider {
            reply: Some("unused"),
            calls: AtomicUsize::new(0),
        });
        let app = app_with(provider.clone(), kb());

        let response = app.oneshot(ask_request("")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(answer_body(response).await, prompt::EMPTY_QUESTION_ANSWER);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_question_field_is_400() {
        let provider = Arc::new(MockProvider {
            reply: Some("unused"),
            calls: AtomicUsize::new(0),
        });
        let app = app_with(provider, kb());

        let request = Request::builder()
            .method("POST")
            .uri("/ask")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_knowledge_base_is_503() {
        let provider = Arc::new(MockProvider {
            reply: Some("unused"),
            calls: AtomicUsize::new(0),
        });
        let app = app_with(provider.clone(), KnowledgeBase::default());

        let response = app.oneshot(ask_request("Qual a idade mínima?")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(answer_body(response).await, prompt::NO_KNOWLEDGE_ANSWER);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_failure_is_500_with_generic_answer() {
        let provider = Arc::new(MockProvider {
            reply: None,
            calls: AtomicUsize::new(0),
        });
        let app = app_with(provider, kb());

        let response = app.oneshot(ask_request("Qual a idade mínima?")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(answer_body(response).await, prompt::MODEL_FAILURE_ANSWER);
    }

    #[tokio::test]
    async fn empty_completion_is_200_with_fallback_text() {
        let provider = Arc::new(MockProvider {
            reply: Some(""),
            calls: AtomicUsize::new(0),
        });
        let app = app_with(provider, kb());

        let response = app.oneshot(ask_request("Qual a idade mínima?")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(answer_body(response).await, prompt::EMPTY_COMPLETION_ANSWER);
    }

    #[tokio::test]
    async fn health_endpoint() {
        let provider = Arc::new(MockProvider {
            reply: Some("unused"),
            calls: AtomicUsize::new(0),
        });
        let app = app_with(provider, kb());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
