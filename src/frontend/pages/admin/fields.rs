//! Form inputs bound to a controller's form buffer.

use folio::content::EntityForm;
use leptos::prelude::*;

use super::actions::Controller;
use crate::components::{ConfirmDeleteDialog, ToastBanner};

const INPUT_CLASS: &str = "w-full px-3 py-2 bg-ctp-base border border-ctp-surface1 rounded text-ctp-text focus:outline-none focus:border-ctp-blue";

/// Read and write one text field of the form held by `controller`.
pub fn bind<F>(
    controller: Controller<F>,
    read: fn(&F) -> &String,
    write: fn(&mut F) -> &mut String,
) -> (Signal<String>, Callback<String>)
where
    F: EntityForm + Send + Sync + 'static,
{
    let value = Signal::derive(move || controller.with(|c| read(c.form()).clone()));
    let on_input = Callback::new(move |v: String| {
        controller.update(|c| *write(c.form_mut()) = v);
    });
    (value, on_input)
}

#[component]
pub fn TextField(
    label: &'static str,
    binding: (Signal<String>, Callback<String>),
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] multiline: bool,
) -> impl IntoView {
    let (value, on_input) = binding;

    let input = if multiline {
        view! {
            <textarea
                rows="4"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                class=INPUT_CLASS
            ></textarea>
        }
            .into_any()
    } else {
        view! {
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                class=INPUT_CLASS
            />
        }
            .into_any()
    };

    view! {
        <label class="block mb-4">
            <span class="block text-sm text-ctp-subtext0 mb-1">{label}</span>
            {input}
        </label>
    }
}

/// Save/cancel row at the bottom of a modal form.
#[component]
pub fn FormButtons<F>(controller: Controller<F>, on_save: Callback<()>) -> impl IntoView
where
    F: EntityForm + Send + Sync + 'static,
{
    let busy = move || controller.with(|c| c.is_busy());

    view! {
        <div class="flex justify-end gap-2 mt-6">
            <button
                type="button"
                on:click=move |_| controller.update(|c| c.close_modal())
                class="px-4 py-2 bg-ctp-surface1 rounded text-ctp-text hover:bg-ctp-surface2"
            >
                "Cancel"
            </button>
            <button
                type="button"
                on:click=move |_| on_save.run(())
                disabled=busy
                class="px-4 py-2 bg-ctp-blue rounded text-ctp-base font-medium disabled:opacity-50"
            >
                {move || if busy() { "Saving..." } else { "Save" }}
            </button>
        </div>
    }
}

/// Toast and delete confirmation for one controller.
pub fn feedback<F>(controller: Controller<F>, on_confirm: Callback<()>) -> impl IntoView
where
    F: EntityForm + Send + Sync + 'static,
{
    let toast = Memo::new(move |_| controller.with(|c| c.toast().clone()));
    let dialog = Memo::new(move |_| controller.with(|c| c.confirm().clone()));
    let busy = Memo::new(move |_| controller.with(|c| c.is_busy()));

    view! {
        <ToastBanner toast=toast on_dismiss=Callback::new(move |_| controller.update(|c| c.dismiss_toast()))/>
        <ConfirmDeleteDialog
            dialog=dialog
            busy=busy
            on_confirm=on_confirm
            on_cancel=Callback::new(move |_| controller.update(|c| c.cancel_delete()))
        />
    }
}
