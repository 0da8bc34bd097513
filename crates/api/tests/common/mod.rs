//! Shared helpers for the API integration tests.
//!
//! The app is built with the same router as production but backed by the
//! in-memory stores, a static layout and a temporary upload directory, so no
//! database is needed.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use letterpress_api::auth::jwt::{generate_access_token, JwtConfig};
use letterpress_api::config::ServerConfig;
use letterpress_api::layout::{LayoutProvider, StaticLayoutProvider};
use letterpress_api::router::build_app_router;
use letterpress_api::services::TemplateService;
use letterpress_api::state::AppState;
use letterpress_api::uploads::UploadStorage;
use letterpress_core::types::{new_id, DbId};
use letterpress_db::memory::{MemoryTemplateStore, MemoryUserStore};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Layout used unless a test supplies its own.
pub const TEST_LAYOUT: &str = "<html>{{title}}{{content}}{{company}}</html>";

/// A router plus the resources that must outlive it.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    /// Dropped (and deleted) with the app.
    pub upload_dir: TempDir,
}

impl TestApp {
    /// A fresh handle to the router for one request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// A valid Bearer token for `user_id`. The user need not be registered.
    pub fn token_for(&self, user_id: DbId) -> String {
        generate_access_token(user_id, &self.config.jwt).expect("token generation")
    }

    /// A token for a brand new, unregistered user id.
    pub fn new_user_token(&self) -> String {
        self.token_for(new_id())
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 60,
        },
        layout_path: PathBuf::from("templates/layout.html"),
        upload_dir,
        max_upload_bytes: 64 * 1024,
        public_base_url: None,
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with_layout(Arc::new(StaticLayoutProvider::new(TEST_LAYOUT)))
}

pub fn build_test_app_with_layout(layouts: Arc<dyn LayoutProvider>) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("temp upload dir");
    let config = test_config(upload_dir.path().to_path_buf());

    let state = AppState {
        config: Arc::new(config.clone()),
        users: Arc::new(MemoryUserStore::new()),
        templates: Arc::new(TemplateService::new(
            Arc::new(MemoryTemplateStore::new()),
            layouts,
        )),
        uploads: Arc::new(UploadStorage::new(upload_dir.path(), None)),
    };

    TestApp {
        router: build_app_router(state, &config),
        config,
        upload_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, &body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), &body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), &body)).await
}

/// POST a single-file multipart form.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    field: &str,
    filename: &str,
    data: &[u8],
    token: &str,
) -> Response<Body> {
    let boundary = "letterpress-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::HOST, "localhost:5000")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Domain helpers
// ---------------------------------------------------------------------------

/// Create a template through the API and return its JSON.
pub async fn create_template(app: Router, token: &str, title: &str, is_public: bool) -> Value {
    let body = serde_json::json!({
        "title": title,
        "content": "<b>x</b>",
        "config": {"company": "Acme"},
        "isPublic": is_public,
    });
    let response = post_json_auth(app, "/api/templates", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
