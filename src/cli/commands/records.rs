//! Admin flows shared by the project, blog and tech commands.
//!
//! Every command runs the same [`FormController`] the browser uses and turns
//! its final toast into the command's output.

use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};
use crate::cli::remote::HttpCollection;
use crate::content::{Entity, EntityForm, FormController};

/// Map the controller's last toast to a command result.
pub fn outcome<F: EntityForm>(controller: &FormController<F>) -> CliResult<String> {
    let toast = controller.toast();
    if toast.is_error() {
        Err(CliError::Rejected {
            message: toast.message.clone(),
        })
    } else {
        Ok(toast.message.clone())
    }
}

/// A controller with its list fetched from the server.
pub async fn load<F: EntityForm>(api: &ApiClient) -> CliResult<FormController<F>> {
    let mut controller = FormController::<F>::new();
    controller.refresh(&HttpCollection::<F::Entity>::new(api)).await;
    outcome(&controller)?;
    Ok(controller)
}

/// Submit `form` as a new record.
pub async fn add<F: EntityForm>(
    api: &ApiClient,
    mut controller: FormController<F>,
    form: F,
) -> CliResult<String> {
    controller.open_create();
    *controller.form_mut() = form;
    controller.submit(&HttpCollection::<F::Entity>::new(api)).await;
    outcome(&controller)
}

/// Open `key` for editing, let `apply` change the form, then submit.
pub async fn edit<F: EntityForm>(
    api: &ApiClient,
    mut controller: FormController<F>,
    key: &str,
    apply: impl FnOnce(&mut F),
) -> CliResult<String> {
    let stored = controller
        .find(key)
        .cloned()
        .ok_or_else(|| not_found::<F>(key))?;

    controller.open_edit(&stored);
    apply(controller.form_mut());
    controller.submit(&HttpCollection::<F::Entity>::new(api)).await;
    outcome(&controller)
}

/// Delete `key`. Without `force` nothing is fetched or removed.
pub async fn delete<F: EntityForm>(api: &ApiClient, key: &str, force: bool) -> CliResult<String> {
    if !force {
        return Err(CliError::ConfirmationRequired {
            label: key.to_string(),
        });
    }

    let mut controller = load::<F>(api).await?;
    let stored = controller
        .find(key)
        .cloned()
        .ok_or_else(|| not_found::<F>(key))?;

    controller.request_delete(stored.id.clone(), stored.label());
    controller.confirm_delete(&HttpCollection::<F::Entity>::new(api)).await;
    outcome(&controller)
}

fn not_found<F: EntityForm>(key: &str) -> CliError {
    CliError::NotFound(format!(
        "{} '{}' not found",
        <F::Entity as Entity>::LABEL,
        key
    ))
}
