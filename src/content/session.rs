//! Client-side auth gate.
//!
//! The gate only decides whether admin UI is shown. The server checks the
//! session token on every mutating request.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::client::{Authenticator, ClientError};

/// Session storage key holding the token.
pub const SESSION_KEY: &str = "folio.session";

/// Per-session key/value storage (browser `sessionStorage` or memory).
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process session storage. Clones share the same entries, which is how
/// a "reload" is modelled: a new gate over the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStorage for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

pub struct AuthGate<S: SessionStorage> {
    storage: S,
    token: Option<String>,
}

impl<S: SessionStorage> AuthGate<S> {
    /// Create a gate, restoring any token already in session storage.
    pub fn new(storage: S) -> Self {
        let token = storage.get(SESSION_KEY).filter(|t| !t.is_empty());
        Self { storage, token }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Exchange `password` for a token. Returns `false` and stays logged out
    /// when the server rejects it.
    pub async fn login<A: Authenticator>(&mut self, password: &str, authenticator: &A) -> bool {
        match authenticator.authenticate(password).await {
            Ok(token) => {
                self.storage.set(SESSION_KEY, &token);
                self.token = Some(token);
                true
            }
            Err(_) => false,
        }
    }

    pub fn logout(&mut self) {
        self.storage.remove(SESSION_KEY);
        self.token = None;
    }

    /// Drop the session when `error` is a 401 from the server.
    /// Returns whether the gate logged out.
    pub fn expire_on(&mut self, error: &ClientError) -> bool {
        if !error.is_unauthorized() {
            return false;
        }
        self.logout();
        true
    }
}
