//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::ServerConfig;
use super::state::AppState;
use crate::error::Error;
use crate::models::ChatMessage;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .route("/count", post(count))
        .route("/chat-count", post(chat_count))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer restricted to the configured origin allow-list
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime().as_secs(),
    })
}

fn default_model() -> String {
    "openai".to_string()
}

/// Single-text count request
#[derive(Deserialize)]
pub struct CountRequest {
    /// Text to count
    #[serde(default)]
    pub text: String,
    /// Model selector (openai | claude | gemini | llama)
    #[serde(default = "default_model")]
    pub model: String,
    /// Optional Hugging Face tokenizer identifier (llama only)
    #[serde(default)]
    pub hf_model_id: Option<String>,
}

/// Chat count request
#[derive(Deserialize)]
pub struct ChatCountRequest {
    /// Ordered conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model selector (openai | claude | gemini | llama)
    #[serde(default = "default_model")]
    pub model: String,
}

/// Count response
#[derive(Serialize)]
pub struct CountResponse {
    /// Token count
    pub tokens: usize,
}

/// Count tokens in a single piece of text
///
/// Unknown model selectors fall back to the r50k_base vocabulary; this
/// endpoint only errors on counting failures, never on the selector.
async fn count(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CountRequest>,
) -> Response {
    match state
        .engine
        .count_text(&req.model, &req.text, req.hf_model_id.as_deref())
        .await
    {
        Ok(tokens) => (StatusCode::OK, Json(CountResponse { tokens })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Count tokens in a chat conversation, including framing overhead
///
/// Unlike `/count`, an unknown model selector is a client error here.
async fn chat_count(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatCountRequest>,
) -> Response {
    match state.engine.count_chat(&req.model, &req.messages).await {
        Ok(tokens) => (StatusCode::OK, Json(CountResponse { tokens })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Map a counting error to an HTTP response
fn error_response(err: &Error) -> Response {
    let (status, message) = match err {
        Error::UnknownModel(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        Error::MissingApiKey { .. } => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Counting failed: {err}"),
        ),
    };

    (status, Json(serde_json::json!({"error": message}))).into_response()
}
