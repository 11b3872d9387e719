//! HTTP server: REST surfaces, admin sessions, change notifications.
//!
//! # Architecture
//!
//! - `handlers`: health, login/logout and the flat `/api/{collection}` surface
//! - `v1`: id-addressed records and the resume upload flow
//! - `auth`: session registry and the middleware guarding mutations
//! - `notifier` / `websocket`: broadcast of accepted mutations over `/ws`

pub mod auth;
mod error;
mod handlers;
mod notifier;
mod routes;
mod state;
mod v1;
mod websocket;

#[cfg(test)]
mod auth_test;
#[cfg(test)]
mod mod_test;
#[cfg(test)]
mod notifier_test;
#[cfg(test)]
mod test_support;

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::store::{BlobStore, ContentStore, StoreKind};

pub use auth::{DEFAULT_ADMIN_PASSWORD, DEFAULT_SESSION_TTL, SessionRegistry};
pub use error::{ApiError, ApiJson, ApiResult, ErrorResponse};
pub use notifier::ChangeNotifier;
pub use routes::{ApiDoc, RouterOptions, create_router};
pub use state::AppState;

pub const DEFAULT_PORT: u16 = 3737;

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Root for JSON files, the SQLite database and uploaded blobs
    pub data_dir: PathBuf,
    /// Content store backend
    pub store: StoreKind,
    /// Password exchanged for admin sessions
    pub admin_password: String,
    /// Lifetime of an admin session
    pub session_ttl: Duration,
    /// Built frontend to serve at `/`
    pub static_dir: Option<PathBuf>,
    /// Mount OpenAPI docs at `/docs`
    pub enable_docs: bool,
    /// `-v` count
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("data"),
            store: StoreKind::default(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            session_ttl: DEFAULT_SESSION_TTL,
            static_dir: None,
            enable_docs: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Where uploaded files are kept.
    pub fn blob_dir(&self) -> PathBuf {
        self.data_dir.join("blobs")
    }
}

/// Default filter directive for a `-v` count.
pub fn log_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "folio=info,tower_http=warn",
        1 => "folio=debug,tower_http=info",
        _ => "folio=trace,tower_http=debug",
    }
}

/// Initialize tracing subscriber with env filter. `RUST_LOG` wins over
/// the verbosity default.
fn init_tracing(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_directive(verbosity).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Run the API server with the given configuration and store
pub async fn run(config: Config, store: Arc<dyn ContentStore>) -> std::io::Result<()> {
    init_tracing(config.verbosity);

    let sessions = SessionRegistry::new(&config.admin_password, config.session_ttl);
    if sessions.uses_default_password() {
        warn!("Admin password is the default; set FOLIO_ADMIN_PASSWORD before exposing this server");
    }

    let blobs = BlobStore::open(&config.blob_dir())?;
    let state = AppState::new(store, blobs, ChangeNotifier::new(), sessions);

    let app = create_router(
        state,
        RouterOptions {
            enable_docs: config.enable_docs,
            static_dir: config.static_dir.as_deref(),
        },
    )
    .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(store = ?config.store, "API server listening on http://{}", addr);

    axum::serve(listener, app).await
}
