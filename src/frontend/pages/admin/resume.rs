use folio::content::{CollectionKind, Toast, validate_resume};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::ToastBanner;
use crate::session;
use crate::websocket::use_refetch_trigger;

#[component]
pub fn ResumeAdmin() -> impl IntoView {
    let toast = RwSignal::new(Toast::default());
    let (uploading, set_uploading) = signal(false);
    let (current, set_current) = signal(None::<String>);
    let refetch = use_refetch_trigger(CollectionKind::Resume);

    Effect::new(move |_| {
        refetch.track();
        spawn_local(async move {
            match api::resume::url().await {
                Ok(url) => set_current.set(url),
                Err(e) => toast.update(|t| t.error(format!("Error: {}", e))),
            }
        });
    });

    let on_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Clear the input so picking the same file again fires another change.
        input.set_value("");

        if let Err(e) = validate_resume(&file.type_(), file.size() as u64) {
            toast.update(|t| t.error(e.to_string()));
            return;
        }
        if uploading.get_untracked() {
            return;
        }

        set_uploading.set(true);
        spawn_local(async move {
            let outcome = api::resume::replace(file).await;
            session::expire_on(&outcome);
            set_uploading.set(false);
            match outcome {
                Ok(()) => {
                    toast.update(|t| t.success("Resume uploaded successfully!"));
                    if let Ok(url) = api::resume::url().await {
                        set_current.set(url);
                    }
                }
                Err(e) => toast.update(|t| t.error(format!("Error uploading resume: {}", e))),
            }
        });
    };

    view! {
        <div>
            <h3 class="text-2xl font-semibold text-ctp-text mb-4">"Resume"</h3>
            <div class="bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-6 space-y-4">
                {move || match current.get() {
                    Some(url) => {
                        view! {
                            <p class="text-ctp-subtext0">
                                "Current resume: "
                                <a href=url target="_blank" class="text-ctp-blue hover:underline">"View PDF"</a>
                            </p>
                        }
                            .into_any()
                    }
                    None => view! { <p class="text-ctp-overlay0">"No resume uploaded yet."</p> }.into_any(),
                }}
                <label class="block">
                    <span class="block text-sm text-ctp-subtext0 mb-1">"Upload a PDF (max 5MB)"</span>
                    <input
                        type="file"
                        accept="application/pdf"
                        on:change=on_change
                        disabled=move || uploading.get()
                        class="text-ctp-text"
                    />
                </label>
                <Show when=move || uploading.get()>
                    <p class="text-ctp-yellow">"Uploading..."</p>
                </Show>
            </div>
            <ToastBanner toast=toast on_dismiss=Callback::new(move |_| toast.update(|t| t.dismiss()))/>
        </div>
    }
}
