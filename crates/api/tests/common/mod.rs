#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use noteful_api::auth::jwt::JwtConfig;
use noteful_api::config::ServerConfig;
use noteful_api::router::build_app_router;
use noteful_api::state::AppState;
use noteful_db::MemoryStore;

pub const TEST_PASSWORD: &str = "correct-horse";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 15,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses [`build_app_router`], so tests exercise the production middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState::new(Arc::new(MemoryStore::new()), config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

/// POST a body that is sent verbatim, whether or not it is valid JSON.
pub async fn post_raw_auth(app: &Router, uri: &str, body: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::PUT, uri, &body, Some(token))).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register `username` with [`TEST_PASSWORD`] and return the created user.
pub async fn register(app: &Router, username: &str) -> Value {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/users", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Log in and return the bearer token.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["authToken"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register and log in `username`, returning the bearer token.
pub async fn signup(app: &Router, username: &str) -> String {
    register(app, username).await;
    login(app, username, TEST_PASSWORD).await
}

/// Create a folder via the API and return its id.
pub async fn create_folder(app: &Router, token: &str, name: &str) -> i64 {
    let response = post_json_auth(app, "/api/folders", serde_json::json!({ "name": name }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a tag via the API and return its id.
pub async fn create_tag(app: &Router, token: &str, name: &str) -> i64 {
    let response = post_json_auth(app, "/api/tags", serde_json::json!({ "name": name }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a note via the API and return the `data` payload.
pub async fn create_note(app: &Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app, "/api/notes", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
