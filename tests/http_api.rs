//! Endpoint-level tests for the counting API.
//!
//! These drive the real router in-process, verifying status codes, error
//! bodies, and the fallback/reject asymmetry between the two endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use tokenmeter::server::{create_router, AppState, ServerConfig};

/// Build a router over fresh state
fn test_router() -> axum::Router {
    let state = AppState::new(ServerConfig::default()).unwrap();
    create_router(Arc::new(state))
}

/// POST a JSON body and return (status, parsed body)
async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_reports_ok() {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_count_empty_text_is_zero() {
    let (status, body) = post_json(
        test_router(),
        "/count",
        json!({"text": "", "model": "openai"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokens"], 0);
}

#[tokio::test]
async fn test_count_defaults_to_openai() {
    let text = "Hello, world!";

    let (status, body) = post_json(test_router(), "/count", json!({"text": text})).await;

    assert_eq!(status, StatusCode::OK);
    let expected = tiktoken_rs::cl100k_base()
        .unwrap()
        .encode_ordinary(text)
        .len();
    assert_eq!(body["tokens"], expected as u64);
}

#[tokio::test]
async fn test_count_openai_and_claude_agree() {
    let text = "Shared vocabulary means identical counts.";

    let (_, openai) = post_json(
        test_router(),
        "/count",
        json!({"text": text, "model": "openai"}),
    )
    .await;
    let (_, claude) = post_json(
        test_router(),
        "/count",
        json!({"text": text, "model": "claude"}),
    )
    .await;

    assert_eq!(openai["tokens"], claude["tokens"]);
}

#[tokio::test]
async fn test_count_unknown_model_falls_back() {
    let text = "An unrecognized selector must not error here.";

    let (status, body) = post_json(
        test_router(),
        "/count",
        json!({"text": text, "model": "some-future-model"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let expected = tiktoken_rs::r50k_base()
        .unwrap()
        .encode_ordinary(text)
        .len();
    assert_eq!(body["tokens"], expected as u64);
}

#[tokio::test]
async fn test_chat_count_unknown_model_is_client_error() {
    let (status, body) = post_json(
        test_router(),
        "/chat-count",
        json!({
            "messages": [{"role": "user", "content": "hi"}],
            "model": "some-future-model",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Unknown model"));
}

#[tokio::test]
async fn test_chat_count_single_message_overhead() {
    let content = "How many tokens am I?";
    let encoded = tiktoken_rs::cl100k_base()
        .unwrap()
        .encode_ordinary(content)
        .len();

    let (status, body) = post_json(
        test_router(),
        "/chat-count",
        json!({
            "messages": [{"role": "user", "content": content}],
            "model": "openai",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokens"], (encoded + 4 + 2) as u64);

    let (status, body) = post_json(
        test_router(),
        "/chat-count",
        json!({
            "messages": [{"role": "user", "content": content}],
            "model": "claude",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokens"], (encoded + 6) as u64);
}

#[tokio::test]
async fn test_chat_count_rejects_malformed_role() {
    let (status, _) = post_json(
        test_router(),
        "/chat-count",
        json!({
            "messages": [{"role": "narrator", "content": "hi"}],
            "model": "openai",
        }),
    )
    .await;

    // Axum's Json extractor rejects the body before the handler runs
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_gemini_without_key_is_server_error() {
    std::env::remove_var("GEMINI_API_KEY");

    let (status, body) = post_json(
        test_router(),
        "/count",
        json!({"text": "hello", "model": "gemini"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_cors_preflight_for_allowed_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/count")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();
    let allowed = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    assert_eq!(allowed.as_deref(), Some("http://localhost:5173"));
}

#[tokio::test]
async fn test_cors_preflight_for_unlisted_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/count")
        .header(header::ORIGIN, "https://evil.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
