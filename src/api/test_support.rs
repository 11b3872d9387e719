//! Shared fixtures for router tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use super::{AppState, ChangeNotifier, RouterOptions, SessionRegistry, create_router};
use crate::store::{BlobStore, ContentStore, FileStore, SqliteStore};

pub const TEST_PASSWORD: &str = "s3cret";

/// A router over a fresh store, plus the temp dir backing it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub async fn file() -> Self {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        Self::build(Arc::new(store), dir)
    }

    pub async fn sqlite() -> Self {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::in_memory().await.unwrap();
        Self::build(Arc::new(store), dir)
    }

    fn build(store: Arc<dyn ContentStore>, dir: TempDir) -> Self {
        let blobs = BlobStore::open(&dir.path().join("blobs")).unwrap();
        let sessions = SessionRegistry::new(TEST_PASSWORD, Duration::from_secs(60));
        let state = AppState::new(store, blobs, ChangeNotifier::new(), sessions);
        let router = create_router(state.clone(), RouterOptions::default());
        Self {
            router,
            state,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    /// Log in and return a bearer token.
    pub async fn token(&self) -> String {
        let (status, body) = self
            .send(json_request(
                "POST",
                "/api/auth/login",
                None,
                serde_json::json!({ "password": TEST_PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    raw_json_request(method, uri, token, &body.to_string())
}

/// A request with a JSON content type and `body` sent verbatim.
pub fn raw_json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}
