//! Live test server for command tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::{self, Next};
use tempfile::TempDir;
use tokio::net::TcpListener;

use crate::api::{AppState, ChangeNotifier, RouterOptions, SessionRegistry, create_router};
use crate::cli::api_client::ApiClient;
use crate::store::{BlobStore, FileStore};

pub const TEST_PASSWORD: &str = "let-me-in";

pub struct TestServer {
    pub url: String,
    gets: Arc<AtomicUsize>,
    _dir: TempDir,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Client without a session.
    pub fn anonymous(&self) -> ApiClient {
        ApiClient::new(Some(self.url.clone()))
    }

    /// GET requests served so far.
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Client carrying a fresh session token.
    pub async fn admin(&self) -> ApiClient {
        let token = reqwest::Client::new()
            .post(format!("{}/api/auth/login", self.url))
            .json(&serde_json::json!({ "password": TEST_PASSWORD }))
            .send()
            .await
            .unwrap()
            .json::<serde_json::Value>()
            .await
            .unwrap()["token"]
            .as_str()
            .unwrap()
            .to_string();
        self.anonymous().with_token(Some(token))
    }
}

/// Spawn a test HTTP server over a file store in a temp dir
pub async fn spawn_test_server() -> TestServer {
    let _ = rustls::crypto::ring::default_provider().install_default();

    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path()).expect("Failed to open store");
    let blobs = BlobStore::open(&dir.path().join("blobs")).expect("Failed to open blobs");
    let state = AppState::new(
        Arc::new(store),
        blobs,
        ChangeNotifier::new(),
        SessionRegistry::new(TEST_PASSWORD, Duration::from_secs(600)),
    );
    let gets = Arc::new(AtomicUsize::new(0));
    let counter = gets.clone();
    let app = create_router(state, RouterOptions::default()).layer(middleware::from_fn(
        move |req: Request, next: Next| {
            let counter = counter.clone();
            async move {
                if req.method() == Method::GET {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
                next.run(req).await
            }
        },
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        url,
        gets,
        _dir: dir,
        _handle: handle,
    }
}
