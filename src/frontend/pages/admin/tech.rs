use folio::content::{Stored, Tech, TechForm};
use leptos::prelude::*;

use super::actions::{self, Controller, use_controller};
use super::fields::{FormButtons, TextField, bind, feedback};
use crate::components::Modal;

const NEW_CATEGORY: &str = "__new__";

#[component]
pub fn TechAdmin() -> impl IntoView {
    let controller = use_controller::<TechForm>();

    let open = Signal::derive(move || controller.with(|c| c.is_modal_open()));
    let title = Signal::derive(move || controller.with(|c| c.modal_title()));

    view! {
        <div>
            <div class="flex justify-between items-center mb-4">
                <h3 class="text-2xl font-semibold text-ctp-text">"Tech Stack"</h3>
                <button
                    on:click=move |_| controller.update(|c| c.open_create())
                    class="px-4 py-2 bg-ctp-blue text-ctp-base rounded font-medium"
                >
                    "+ Add Technology"
                </button>
            </div>

            <div class="space-y-6">
                {move || {
                    let groups = controller.with(|c| c.grouped());
                    if groups.is_empty() {
                        return view! { <p class="text-ctp-overlay0">"No technologies yet."</p> }.into_any();
                    }
                    groups
                        .into_iter()
                        .map(|(category, members)| view! { <CategoryGroup controller=controller category=category members=members/> })
                        .collect_view()
                        .into_any()
                }}
            </div>

            <Modal open=open title=title on_close=Callback::new(move |_| controller.update(|c| c.close_modal()))>
                <TextField label="Name" binding=bind(controller, |f| &f.name, |f| &mut f.name)/>
                <CategoryPicker controller=controller/>
                <FormButtons controller=controller on_save=Callback::new(move |_| actions::submit(controller))/>
            </Modal>

            {feedback(controller, Callback::new(move |_| actions::confirm_delete(controller)))}
        </div>
    }
}

#[component]
fn CategoryGroup(
    controller: Controller<TechForm>,
    category: String,
    members: Vec<Stored<Tech>>,
) -> impl IntoView {
    let (renaming, set_renaming) = signal(false);
    let (new_name, set_new_name) = signal(category.clone());
    let current = StoredValue::new(category);

    let save = move || {
        actions::rename_category(controller, current.get_value(), new_name.get_untracked());
        set_renaming.set(false);
    };

    view! {
        <div class="bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-4">
            <div class="flex items-center gap-2 mb-3">
                <Show
                    when=move || renaming.get()
                    fallback=move || {
                        view! {
                            <h4 class="text-lg font-semibold text-ctp-lavender">{current.get_value()}</h4>
                            <button
                                on:click=move |_| {
                                    set_new_name.set(current.get_value());
                                    set_renaming.set(true);
                                }
                                class="text-xs text-ctp-overlay0 hover:text-ctp-text"
                            >
                                "Rename"
                            </button>
                        }
                    }
                >
                    <input
                        type="text"
                        prop:value=move || new_name.get()
                        on:input=move |ev| set_new_name.set(event_target_value(&ev))
                        class="px-2 py-1 bg-ctp-base border border-ctp-surface1 rounded text-ctp-text"
                    />
                    <button on:click=move |_| save() class="text-xs px-2 py-1 bg-ctp-blue text-ctp-base rounded">
                        "Save"
                    </button>
                    <button
                        on:click=move |_| set_renaming.set(false)
                        class="text-xs px-2 py-1 bg-ctp-surface1 text-ctp-text rounded"
                    >
                        "Cancel"
                    </button>
                </Show>
            </div>
            <div class="flex flex-wrap gap-2">
                {members
                    .into_iter()
                    .map(|stored| {
                        let for_edit = stored.clone();
                        let key = stored.id.clone();
                        let label = stored.label().to_string();
                        view! {
                            <span class="flex items-center gap-1 bg-ctp-surface1 text-ctp-text px-3 py-1 rounded-full text-sm">
                                {stored.record.name}
                                <button
                                    on:click=move |_| controller.update(|c| c.open_edit(&for_edit))
                                    class="text-ctp-overlay0 hover:text-ctp-blue"
                                    title="Edit"
                                >
                                    "✎"
                                </button>
                                <button
                                    on:click=move |_| {
                                        let (key, label) = (key.clone(), label.clone());
                                        controller.update(|c| c.request_delete(key, label))
                                    }
                                    class="text-ctp-overlay0 hover:text-ctp-red"
                                    title="Delete"
                                >
                                    "×"
                                </button>
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Pick an existing category or switch to typing a new one.
#[component]
fn CategoryPicker(controller: Controller<TechForm>) -> impl IntoView {
    let custom = move || controller.with(|c| c.form().use_custom_category);
    let selected = move || {
        controller.with(|c| {
            if c.form().use_custom_category {
                NEW_CATEGORY.to_string()
            } else {
                c.form().category.clone()
            }
        })
    };

    let on_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        controller.update(|c| {
            let form = c.form_mut();
            if value == NEW_CATEGORY {
                form.use_custom_category = true;
            } else {
                form.use_custom_category = false;
                form.category = value;
            }
        });
    };

    view! {
        <label class="block mb-4">
            <span class="block text-sm text-ctp-subtext0 mb-1">"Category"</span>
            <select
                prop:value=selected
                on:change=on_change
                class="w-full px-3 py-2 bg-ctp-base border border-ctp-surface1 rounded text-ctp-text"
            >
                <option value="">"Select a category"</option>
                {move || {
                    controller
                        .with(|c| c.categories())
                        .into_iter()
                        .map(|name| view! { <option value=name.clone()>{name}</option> })
                        .collect_view()
                }}
                <option value=NEW_CATEGORY>"+ New category"</option>
            </select>
        </label>
        <Show when=custom>
            <TextField
                label="New category"
                placeholder="e.g. Cloud & DevOps"
                binding=bind(controller, |f| &f.new_category, |f| &mut f.new_category)
            />
        </Show>
    }
}
