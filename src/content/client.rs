//! Client-side view of a record store.
//!
//! The admin controllers talk to storage only through these traits. The CLI
//! implements them over reqwest, the browser over gloo-net and tests in memory.
//! None of the futures are required to be `Send`, so wasm clients fit too.

#![allow(async_fn_in_trait)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{Entity, Stored, Tech};

/// Error body returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server no longer accepts the session token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Percent-encode one URL path segment.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// List/create/update/remove against one collection, keyed by store id.
pub trait RecordClient<E: Entity> {
    async fn list(&self) -> ClientResult<Vec<Stored<E>>>;

    async fn create(&self, record: &E) -> ClientResult<Stored<E>>;

    /// Full replace of the record stored under `key`.
    async fn update(&self, key: &str, record: &E) -> ClientResult<Stored<E>>;

    async fn remove(&self, key: &str) -> ClientResult<()>;
}

/// Batch category maintenance for the tech stack.
pub trait CategoryClient: RecordClient<Tech> {
    /// Move every technology in `from` to `to`, returning how many moved.
    async fn rename_category(&self, from: &str, to: &str) -> ClientResult<usize>;
}

/// Exchanges the admin password for a session token.
pub trait Authenticator {
    async fn authenticate(&self, password: &str) -> ClientResult<String>;
}
