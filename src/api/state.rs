//! Application state for the API server.

use std::sync::Arc;

use super::auth::SessionRegistry;
use super::notifier::ChangeNotifier;
use crate::content::ChangeEvent;
use crate::store::{BlobStore, ContentStore};

/// Shared application state.
///
/// The content store is a trait object so the router is the same for the
/// file and SQLite backends.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ContentStore>,
    blobs: Arc<BlobStore>,
    notifier: ChangeNotifier,
    sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ContentStore>,
        blobs: BlobStore,
        notifier: ChangeNotifier,
        sessions: SessionRegistry,
    ) -> Self {
        Self {
            store,
            blobs: Arc::new(blobs),
            notifier,
            sessions: Arc::new(sessions),
        }
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Broadcast an accepted mutation.
    pub fn publish(&self, event: ChangeEvent) {
        self.notifier.notify(event);
    }
}
