//! WebSocket change feed for real-time updates

use codee::string::JsonSerdeCodec;
use folio::content::{ChangeEvent, CollectionKind};
use leptos::prelude::*;
use leptos_use::core::ConnectionReadyState;
use leptos_use::{UseWebSocketOptions, UseWebSocketReturn, use_websocket_with_options};

// Development: Trunk proxy at /dev/ws forwards to backend ws://localhost:3737/ws
#[cfg(debug_assertions)]
fn ws_url() -> String {
    "ws://localhost:8080/dev/ws".to_string()
}

// Production: same host as the page
#[cfg(not(debug_assertions))]
fn ws_url() -> String {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location
        .as_ref()
        .and_then(|l| l.protocol().ok())
        .unwrap_or_else(|| "http:".to_string());
    let host = location
        .as_ref()
        .and_then(|l| l.host().ok())
        .unwrap_or_else(|| "localhost:3737".to_string());

    let ws_protocol = if protocol == "https:" { "wss:" } else { "ws:" };
    format!("{}//{}/ws", ws_protocol, host)
}

/// Connection state and the most recent change, shared through context.
#[derive(Clone, Copy)]
pub struct ChangeFeed {
    pub ready_state: Signal<ConnectionReadyState>,
    pub last: Signal<Option<ChangeEvent>>,
}

#[component]
pub fn WebSocketProvider(children: Children) -> impl IntoView {
    let UseWebSocketReturn {
        ready_state,
        message,
        ..
    } = use_websocket_with_options::<ChangeEvent, ChangeEvent, JsonSerdeCodec>(
        &ws_url(),
        UseWebSocketOptions::default()
            .immediate(true)
            .reconnect_limit(leptos_use::ReconnectLimit::Limited(5))
            .reconnect_interval(3000)
            .on_error(|error| {
                web_sys::console::error_1(&format!("WebSocket error: {:?}", error).into());
            }),
    );

    provide_context(ChangeFeed {
        ready_state,
        last: message,
    });

    children()
}

/// Connection state for the status bar.
pub fn use_websocket_connection() -> Signal<ConnectionReadyState> {
    use_context::<ChangeFeed>()
        .map(|feed| feed.ready_state)
        .unwrap_or_else(|| Signal::derive(|| ConnectionReadyState::Closed))
}

/// A counter bumped whenever the server reports a change to `collection`.
///
/// Pages read it inside their fetch effect to refetch on change.
pub fn use_refetch_trigger(collection: CollectionKind) -> ReadSignal<u32> {
    let (trigger, set_trigger) = signal(0u32);
    if let Some(feed) = use_context::<ChangeFeed>() {
        Effect::new(move |_| {
            if let Some(event) = feed.last.get()
                && event.collection == collection
            {
                set_trigger.update(|n| *n = n.wrapping_add(1));
            }
        });
    }
    trigger
}
