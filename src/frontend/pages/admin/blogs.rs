use folio::content::BlogForm;
use leptos::prelude::*;

use super::actions::{self, use_controller};
use super::fields::{FormButtons, TextField, bind, feedback};
use crate::components::Modal;

#[component]
pub fn BlogsAdmin() -> impl IntoView {
    let controller = use_controller::<BlogForm>();

    let open = Signal::derive(move || controller.with(|c| c.is_modal_open()));
    let title = Signal::derive(move || controller.with(|c| c.modal_title()));

    view! {
        <div>
            <div class="flex justify-between items-center mb-4">
                <h3 class="text-2xl font-semibold text-ctp-text">"Blog Posts"</h3>
                <button
                    on:click=move |_| controller.update(|c| c.open_create())
                    class="px-4 py-2 bg-ctp-blue text-ctp-base rounded font-medium"
                >
                    "+ Add Blog Post"
                </button>
            </div>

            <div class="space-y-3">
                {move || {
                    let list = controller.with(|c| c.list().to_vec());
                    if list.is_empty() {
                        return view! { <p class="text-ctp-overlay0">"No blog posts yet."</p> }.into_any();
                    }
                    list.into_iter()
                        .map(|stored| {
                            let for_edit = stored.clone();
                            let key = stored.id.clone();
                            let label = stored.label().to_string();
                            view! {
                                <div class="flex justify-between items-start bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-4">
                                    <div>
                                        <h4 class="font-semibold text-ctp-text">{stored.record.title}</h4>
                                        <p class="text-sm text-ctp-subtext0">{stored.record.description}</p>
                                        <a href=stored.record.url.clone() target="_blank" class="text-xs text-ctp-blue">
                                            {stored.record.url}
                                        </a>
                                    </div>
                                    <div class="flex gap-2 shrink-0">
                                        <button
                                            on:click=move |_| controller.update(|c| c.open_edit(&for_edit))
                                            class="px-3 py-1 text-sm bg-ctp-surface1 rounded text-ctp-text hover:bg-ctp-surface2"
                                        >
                                            "Edit"
                                        </button>
                                        <button
                                            on:click=move |_| {
                                                let (key, label) = (key.clone(), label.clone());
                                                controller.update(|c| c.request_delete(key, label))
                                            }
                                            class="px-3 py-1 text-sm bg-ctp-red/20 rounded text-ctp-red hover:bg-ctp-red/30"
                                        >
                                            "Delete"
                                        </button>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>

            <Modal open=open title=title on_close=Callback::new(move |_| controller.update(|c| c.close_modal()))>
                <TextField label="Title" binding=bind(controller, |f| &f.title, |f| &mut f.title)/>
                <TextField
                    label="Description"
                    multiline=true
                    binding=bind(controller, |f| &f.description, |f| &mut f.description)
                />
                <TextField
                    label="URL"
                    placeholder="https://..."
                    binding=bind(controller, |f| &f.url, |f| &mut f.url)
                />
                <FormButtons controller=controller on_save=Callback::new(move |_| actions::submit(controller))/>
            </Modal>

            {feedback(controller, Callback::new(move |_| actions::confirm_delete(controller)))}
        </div>
    }
}
