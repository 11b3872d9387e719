use leptos::prelude::*;

/// Centered overlay holding an add/edit form.
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-40">
                <div class="bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-6 w-full max-w-lg shadow-xl">
                    <div class="flex justify-between items-center mb-4">
                        <h3 class="text-xl font-semibold text-ctp-text">{move || title.get()}</h3>
                        <button
                            on:click=move |_| on_close.run(())
                            class="text-ctp-overlay0 hover:text-ctp-text text-2xl leading-none"
                        >
                            "×"
                        </button>
                    </div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}
