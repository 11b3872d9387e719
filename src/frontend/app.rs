use leptos::prelude::*;
use leptos_use::core::ConnectionReadyState;

use crate::pages::{Admin, Home};
use crate::websocket::{WebSocketProvider, use_websocket_connection};

/// Which half of the site is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Public,
    Admin,
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <WebSocketProvider>
            <NavAndContent/>
        </WebSocketProvider>
    }
}

#[component]
fn NavAndContent() -> impl IntoView {
    let ws_state = use_websocket_connection();
    let (current, set_current) = signal(Section::Public);

    let nav_button = move |target: Section, label: &'static str| {
        view! {
            <button
                on:click=move |_| set_current.set(target)
                class="px-4 py-2 rounded-lg font-medium transition-colors"
                class:bg-ctp-surface2=move || current.get() == target
                class:text-ctp-text=move || current.get() == target
                class:text-ctp-subtext1=move || current.get() != target
                class:hover:bg-ctp-surface1=move || current.get() != target
            >
                {label}
            </button>
        }
    };

    view! {
        <main class="min-h-screen bg-ctp-base flex flex-col">
            <nav class="bg-ctp-surface0 border-b border-ctp-surface1 relative sticky top-0 z-30">
                // WebSocket connection status bar (left edge)
                <div
                    class="absolute left-0 top-0 bottom-0 w-2 cursor-help"
                    title=move || match ws_state.get() {
                        ConnectionReadyState::Open => "Connected",
                        ConnectionReadyState::Connecting => "Connecting...",
                        ConnectionReadyState::Closing => "Closing...",
                        ConnectionReadyState::Closed => "Disconnected",
                    }
                    class:bg-ctp-green=move || matches!(ws_state.get(), ConnectionReadyState::Open)
                    class:bg-ctp-yellow=move || {
                        matches!(
                            ws_state.get(),
                            ConnectionReadyState::Connecting | ConnectionReadyState::Closing
                        )
                    }
                    class:bg-ctp-red=move || matches!(ws_state.get(), ConnectionReadyState::Closed)
                ></div>
                <div class="container mx-auto flex justify-between items-center px-6 py-4">
                    <div class="flex items-center gap-2">
                        <h1 class="text-3xl font-bold bg-gradient-to-r from-ctp-mauve to-ctp-blue bg-clip-text text-transparent">
                            "folio"
                        </h1>
                        <span class="text-xs text-ctp-subtext0 font-mono">
                            {env!("CARGO_PKG_VERSION")}
                        </span>
                    </div>
                    <div class="flex gap-2 items-center">
                        <Show when=move || current.get() == Section::Public>
                            <a href="#projects" class="px-3 py-2 text-ctp-subtext1 hover:text-ctp-text">"Projects"</a>
                            <a href="#tech" class="px-3 py-2 text-ctp-subtext1 hover:text-ctp-text">"Tech"</a>
                            <a href="#blogs" class="px-3 py-2 text-ctp-subtext1 hover:text-ctp-text">"Blog"</a>
                            <a href="#resume" class="px-3 py-2 text-ctp-subtext1 hover:text-ctp-text">"Resume"</a>
                        </Show>
                        {nav_button(Section::Public, "Portfolio")}
                        {nav_button(Section::Admin, "Admin")}
                    </div>
                </div>
            </nav>

            <div class="flex-1">
                {move || match current.get() {
                    Section::Public => view! { <Home/> }.into_any(),
                    Section::Admin => view! { <Admin/> }.into_any(),
                }}
            </div>
        </main>
    }
}
