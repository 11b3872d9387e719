use folio::content::ConfirmDialog;
use leptos::prelude::*;

#[component]
pub fn ConfirmDeleteDialog(
    #[prop(into)] dialog: Signal<ConfirmDialog>,
    #[prop(into)] busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || dialog.with(|d| d.open)>
            <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50">
                <div class="bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-6 w-full max-w-md">
                    <h3 class="text-lg font-semibold text-ctp-text mb-2">"Confirm Delete"</h3>
                    <p class="text-ctp-subtext0 mb-6">
                        "Are you sure you want to delete \""
                        {move || dialog.with(|d| d.label.clone())}
                        "\"? This action cannot be undone."
                    </p>
                    <div class="flex justify-end gap-2">
                        <button
                            on:click=move |_| on_cancel.run(())
                            class="px-4 py-2 bg-ctp-surface1 rounded text-ctp-text hover:bg-ctp-surface2"
                        >
                            "Cancel"
                        </button>
                        <button
                            on:click=move |_| on_confirm.run(())
                            disabled=move || busy.get()
                            class="px-4 py-2 bg-ctp-red rounded text-ctp-base font-medium disabled:opacity-50"
                        >
                            {move || if busy.get() { "Deleting..." } else { "Delete" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
