//! Browser `sessionStorage` for the admin auth gate.

use folio::content::{AuthGate, ClientResult, SESSION_KEY, SessionStorage};
use gloo_storage::{SessionStorage as WebSessionStorage, Storage};
use leptos::prelude::*;

thread_local! {
    static SIGNED_IN: ArcRwSignal<bool> = ArcRwSignal::new(gate().is_authenticated());
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSession;

impl SessionStorage for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        WebSessionStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = WebSessionStorage::set(key, value) {
            web_sys::console::error_1(&format!("Failed to store session: {}", e).into());
        }
    }

    fn remove(&self, key: &str) {
        WebSessionStorage::delete(key);
    }
}

/// A gate over the tab's session storage. Every gate sees the same token.
pub fn gate() -> AuthGate<BrowserSession> {
    AuthGate::new(BrowserSession)
}

/// Token attached to admin requests, if logged in.
pub fn stored_token() -> Option<String> {
    BrowserSession.get(SESSION_KEY).filter(|t| !t.is_empty())
}

/// Whether the admin page shows the dashboard. Shared by the whole tab.
pub fn signed_in() -> RwSignal<bool> {
    SIGNED_IN.with(|signal| RwSignal::from(signal.clone()))
}

/// Log out after a 401 so the admin page falls back to the login form.
pub fn expire_on<T>(outcome: &ClientResult<T>) {
    if let Err(e) = outcome
        && gate().expire_on(e)
    {
        SIGNED_IN.with(|signal| signal.set(false));
    }
}
