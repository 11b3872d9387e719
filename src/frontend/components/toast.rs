use folio::content::{AUTO_DISMISS, Toast};
use leptos::prelude::*;

/// Bottom-right status message that dismisses itself.
///
/// A new toast restarts the timer; unmounting cancels it.
#[component]
pub fn ToastBanner(#[prop(into)] toast: Signal<Toast>, on_dismiss: Callback<()>) -> impl IntoView {
    let pending = StoredValue::new(None::<TimeoutHandle>);

    let cancel = move || {
        if let Some(handle) = pending.try_get_value().flatten() {
            handle.clear();
        }
        pending.try_set_value(None);
    };

    Effect::new(move |_| {
        let visible = toast.with(|t| t.visible);
        cancel();
        if visible {
            match set_timeout_with_handle(move || on_dismiss.run(()), AUTO_DISMISS) {
                Ok(handle) => pending.set_value(Some(handle)),
                Err(e) => web_sys::console::error_1(&e),
            }
        }
    });

    on_cleanup(cancel);

    view! {
        <Show when=move || toast.with(|t| t.visible)>
            <div
                class="fixed bottom-6 right-6 px-4 py-3 rounded-lg shadow-lg text-ctp-base font-medium z-50"
                class:bg-ctp-green=move || !toast.with(|t| t.is_error())
                class:bg-ctp-red=move || toast.with(|t| t.is_error())
            >
                {move || toast.with(|t| t.message.clone())}
            </div>
        </Show>
    }
}
