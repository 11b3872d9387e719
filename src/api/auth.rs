//! Admin sessions.
//!
//! The admin password is exchanged for a random bearer token. Only the
//! SHA-256 digest of each token is kept, together with its expiry. Every
//! request that is not a read must carry a live token.

use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::{Method, header};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine as _;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::AppState;
use super::error::ApiError;

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

pub struct SessionRegistry {
    password_digest: String,
    ttl: Duration,
    sessions: DashMap<String, Instant>,
}

impl SessionRegistry {
    pub fn new(password: &str, ttl: Duration) -> Self {
        Self {
            password_digest: digest(password),
            ttl,
            sessions: DashMap::new(),
        }
    }

    pub fn uses_default_password(&self) -> bool {
        self.password_digest == digest(DEFAULT_ADMIN_PASSWORD)
    }

    /// Exchange `password` for a new token, or `None` if it is wrong.
    pub fn login(&self, password: &str) -> Option<String> {
        if digest(password) != self.password_digest {
            warn!("Rejected admin login");
            return None;
        }

        let now = Instant::now();
        self.sessions.retain(|_, expires| *expires > now);

        let token = generate_token();
        self.sessions.insert(digest(&token), now + self.ttl);
        debug!(active = self.sessions.len(), "Admin session opened");
        Some(token)
    }

    /// Whether `token` names a live session. Expired sessions are dropped.
    pub fn validate(&self, token: &str) -> bool {
        let key = digest(token);
        let live = self
            .sessions
            .get(&key)
            .is_some_and(|expires| *expires > Instant::now());
        if !live {
            self.sessions.remove(&key);
        }
        live
    }

    /// End the session for `token`. Returns whether one existed.
    pub fn logout(&self, token: &str) -> bool {
        self.sessions.remove(&digest(token)).is_some()
    }
}

fn digest(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    base64::prelude::BASE64_STANDARD_NO_PAD.encode(hasher.finalize())
}

/// 64 hex characters from two v4 UUIDs.
fn generate_token() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware: reads pass, everything else needs a live session.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if matches!(
        *request.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    ) {
        return Ok(next.run(request).await);
    }

    let authorized = bearer_token(&request).map(|token| state.sessions().validate(token));
    match authorized {
        Some(true) => Ok(next.run(request).await),
        Some(false) => Err(ApiError::Unauthorized(
            "Session expired, please log in again".to_string(),
        )),
        None => Err(ApiError::Unauthorized(
            "Authentication required".to_string(),
        )),
    }
}
