//! Change notification system for broadcasting store updates to WebSocket clients.

use tokio::sync::broadcast;

use crate::content::ChangeEvent;

/// Pub/sub notifier for broadcasting store changes to all subscribers.
///
/// Subscribers that fall more than 100 messages behind skip the backlog.
#[derive(Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<ChangeEvent>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    /// Create a new ChangeNotifier with a buffer of 100 messages.
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self { tx }
    }

    /// Subscribe to receive update notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Broadcast an update message to all subscribers.
    pub fn notify(&self, event: ChangeEvent) {
        let _ = self.tx.send(event);
    }
}
