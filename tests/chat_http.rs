//! Integration tests for chat HTTP endpoints.
//!
//! These tests send real requests through the full router (with its tower
//! layers) backed by the in-memory session store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use travel_desk::adapters::storage::InMemorySessionStore;
use travel_desk::adapters::{api_router, ChatAppState};
use travel_desk::config::ServerConfig;
use travel_desk::domain::intake::IntakeRules;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    let state = ChatAppState::new(Arc::new(InMemorySessionStore::new()), IntakeRules::default());
    api_router(state, &ServerConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_chat(user_id: &str, message: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "user_id": user_id, "message": message }).to_string(),
        ))
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// =============================================================================
// POST /chat
// =============================================================================

#[tokio::test]
async fn chat_advances_and_reports_collected_data() {
    let app = app();

    let (status, body) = send(&app, post_chat("u1", "Air Travel")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Could you please provide your full name?",
            "current_step": "get_name",
            "collected_data": { "category": "Air Travel" }
        })
    );

    let (status, body) = send(&app, post_chat("u1", "John Doe")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_step"], "get_email");
    assert_eq!(body["collected_data"]["name"], "John Doe");
}

#[tokio::test]
async fn chat_rejection_keeps_step() {
    let app = app();

    let (status, body) = send(&app, post_chat("u1", "Cruises")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_step"], "get_category");
    assert_eq!(body["collected_data"], json!({}));
}

#[tokio::test]
async fn chat_with_empty_user_id_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, post_chat("", "Air Travel")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn chat_with_malformed_body_is_client_error() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"user_id": "u1"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

// =============================================================================
// start_chat / inspect / reset
// =============================================================================

#[tokio::test]
async fn start_chat_creates_session_that_chat_continues() {
    let app = app();

    let (status, body) = send(&app, empty("POST", "/api/v1/start_chat")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["current_step"], "get_category");
    let user_id = body["user_id"].as_str().unwrap().to_string();
    assert!(!user_id.is_empty());

    let (status, body) = send(&app, empty("GET", &format!("/api/v1/chat/{}", user_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id.as_str());
    assert_eq!(body["current_step"], "get_category");

    let (_, body) = send(&app, post_chat(&user_id, "Promotions")).await;
    assert_eq!(body["current_step"], "get_email");
}

#[tokio::test]
async fn get_unknown_session_is_not_found() {
    let app = app();

    let (status, body) = send(&app, empty("GET", "/api/v1/chat/ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn delete_removes_session() {
    let app = app();
    send(&app, post_chat("u1", "Complaint")).await;

    let (status, _) = send(&app, empty("DELETE", "/api/v1/chat/u1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, empty("GET", "/api/v1/chat/u1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty("DELETE", "/api/v1/chat/u1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Cross-cutting
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = app();

    let (status, body) = send(&app, empty("GET", "/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = app();

    let response = app
        .clone()
        .oneshot(empty("GET", "/api/v1/health"))
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me");
}
