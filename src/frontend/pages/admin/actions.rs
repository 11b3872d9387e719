//! Browser drivers for [`FormController`].
//!
//! The controller lives in a signal, so each action runs the synchronous
//! `begin_*` step, awaits the request in `spawn_local` and applies the
//! outcome with the matching `finish_*` step.

use folio::content::{
    CategoryClient, Entity, EntityForm, FormController, Mutation, RecordClient, Tech, TechForm,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpRecords;
use crate::session;
use crate::websocket::use_refetch_trigger;

pub type Controller<F> = RwSignal<FormController<F>>;

/// A controller whose list follows server-side changes.
pub fn use_controller<F>() -> Controller<F>
where
    F: EntityForm + Send + Sync + 'static,
{
    let controller = RwSignal::new(FormController::<F>::new());
    let refetch = use_refetch_trigger(<F::Entity as Entity>::COLLECTION);

    Effect::new(move |_| {
        refetch.track();
        refresh(controller);
    });

    controller
}

pub fn refresh<F>(controller: Controller<F>)
where
    F: EntityForm + Send + Sync + 'static,
{
    spawn_local(async move {
        let outcome = HttpRecords::<F::Entity>::new().list().await;
        controller.try_update(|c| c.apply_refresh(outcome));
    });
}

pub fn submit<F>(controller: Controller<F>)
where
    F: EntityForm + Send + Sync + 'static,
{
    let Some(mutation) = controller.try_update(|c| c.begin_submit()).flatten() else {
        return;
    };
    spawn_local(async move {
        let client = HttpRecords::<F::Entity>::new();
        let outcome = match &mutation {
            Mutation::Create(record) => client.create(record).await,
            Mutation::Update { key, record } => client.update(key, record).await,
        };
        session::expire_on(&outcome);
        let accepted = controller
            .try_update(|c| c.finish_submit(outcome))
            .unwrap_or(false);
        if accepted {
            refresh(controller);
        }
    });
}

pub fn confirm_delete<F>(controller: Controller<F>)
where
    F: EntityForm + Send + Sync + 'static,
{
    let Some(key) = controller.try_update(|c| c.begin_delete()).flatten() else {
        return;
    };
    spawn_local(async move {
        let outcome = HttpRecords::<F::Entity>::new().remove(&key).await;
        session::expire_on(&outcome);
        let accepted = controller
            .try_update(|c| c.finish_delete(outcome))
            .unwrap_or(false);
        if accepted {
            refresh(controller);
        }
    });
}

pub fn rename_category(controller: Controller<TechForm>, from: String, to: String) {
    let Some(to) = controller
        .try_update(|c| c.begin_rename(&from, &to))
        .flatten()
    else {
        return;
    };
    spawn_local(async move {
        let outcome = HttpRecords::<Tech>::new().rename_category(&from, &to).await;
        session::expire_on(&outcome);
        let accepted = controller
            .try_update(|c| c.finish_rename(outcome))
            .unwrap_or(false);
        if accepted {
            refresh(controller);
        }
    });
}
