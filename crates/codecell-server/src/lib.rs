//! HTTP surface for the codecell code studio.
//!
//! Exposes the code executor and the AI assistant proxy over a small axum
//! router, plus the static entry page. The executor and the proxy are
//! independent collaborators; neither depends on the other.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use codecell::{ExecutionStatus, Executor, Submission};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

pub use crate::actions::AiAction;
pub use crate::gemini::{DEFAULT_MODEL, GeminiClient, GeminiError};

pub mod actions;
pub mod gemini;

const INDEX_HTML: &str = include_str!("../assets/index.html");
const SCRIPT_JS: &str = include_str!("../assets/script.js");

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<Executor>,
    /// Generation client; `None` when no API key was configured
    pub gemini: Option<Arc<GeminiClient>>,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/static/script.js", get(script))
        .route("/health", get(health))
        .route("/api/code/run", post(run_code))
        .route("/api/ai/generate", post(ai_generate))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], SCRIPT_JS)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
struct RunRequest {
    #[serde(default)]
    code: String,

    #[serde(default)]
    inputs: Vec<String>,
}

/// Run a submission and map its status to an HTTP response.
///
/// Success → 200 with the trimmed stdout; runtime error → 400 with the
/// trimmed stderr; timeout → 408; host-side failure → 500 with a generic
/// message (the detail goes to the log, never to the caller).
async fn run_code(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> (StatusCode, Json<Value>) {
    let submission = Submission {
        source: request.code,
        inputs: request.inputs,
    };

    let result = state.executor.execute(&submission).await;

    match result.status {
        ExecutionStatus::Success => (StatusCode::OK, Json(json!({ "output": result.stdout }))),
        ExecutionStatus::RuntimeError => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": result.stderr })))
        }
        ExecutionStatus::Timeout => {
            let limit = state.executor.config().time_limit;
            (
                StatusCode::REQUEST_TIMEOUT,
                Json(json!({
                    "error": format!("Execution timeout: code took too long to run ({limit}s limit).")
                })),
            )
        }
        ExecutionStatus::SystemError => {
            error!(
                message = result.message.as_deref().unwrap_or("unknown"),
                "execution system error"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An unexpected error occurred during execution." })),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    prompt: String,

    /// Action key; validated against the closed set of supported actions
    #[serde(default = "default_action")]
    action: String,
}

fn default_action() -> String {
    "chat_response".to_string()
}

async fn ai_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(action) = AiAction::parse(&request.action) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid AI action specified." })),
        );
    };

    let Some(gemini) = &state.gemini else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "API key is missing. Please set GEMINI_API_KEY." })),
        );
    };

    let user_prompt = action.user_prompt(&request.prompt);
    match gemini.generate(action.system_instruction(), &user_prompt).await {
        Ok(text) => {
            let body = if action.returns_code() {
                json!({ "code": text })
            } else {
                json!({ "text": text })
            };
            (StatusCode::OK, Json(body))
        }
        Err(GeminiError::Api { status, message }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                Json(json!({ "error": format!("API error {}: {message}", status.as_u16()) })),
            )
        }
        Err(e @ GeminiError::Request(_)) => {
            error!("generation request failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("API request failed: {e}") })),
            )
        }
    }
}
