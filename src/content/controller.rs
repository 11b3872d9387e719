//! Entity form controller.
//!
//! One controller drives the admin view of a collection: a form buffer, the
//! cached list, the edit target, the add/edit modal, the delete confirmation
//! and the toast. Lists only change after the store confirms a mutation.
//!
//! Each mutation is split into a synchronous `begin_*` step that decides what
//! to send and a `finish_*` step that applies the outcome. Native callers use
//! the async drivers ([`FormController::submit`] and friends); the browser
//! calls the steps around its own `spawn_local`.

use super::client::{CategoryClient, ClientResult, RecordClient};
use super::feedback::{ConfirmDialog, Toast};
use super::form::{EntityForm, TechForm};
use super::models::{Entity, Stored, Tech, categories};

/// The record currently being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    /// Store id the update is keyed on (the pre-edit natural key for the file store).
    pub key: String,
    /// Pre-edit display label.
    pub label: String,
}

/// A store call the controller has committed to.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<E> {
    Create(E),
    Update { key: String, record: E },
}

#[derive(Debug, Clone)]
pub struct FormController<F: EntityForm> {
    form: F,
    list: Vec<Stored<F::Entity>>,
    editing: Option<EditTarget>,
    modal_open: bool,
    busy: bool,
    confirm: ConfirmDialog,
    toast: Toast,
}

impl<F: EntityForm> Default for FormController<F> {
    fn default() -> Self {
        Self {
            form: F::default(),
            list: Vec::new(),
            editing: None,
            modal_open: false,
            busy: false,
            confirm: ConfirmDialog::default(),
            toast: Toast::default(),
        }
    }
}

impl<F: EntityForm> FormController<F> {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn list(&self) -> &[Stored<F::Entity>] {
        &self.list
    }

    pub fn editing(&self) -> Option<&EditTarget> {
        self.editing.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn confirm(&self) -> &ConfirmDialog {
        &self.confirm
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn dismiss_toast(&mut self) {
        self.toast.dismiss();
    }

    pub fn modal_title(&self) -> String {
        let label = <F::Entity as Entity>::LABEL;
        if self.editing.is_some() {
            format!("Edit {}", label)
        } else {
            format!("Add New {}", label)
        }
    }

    // -------------------------------------------------------------------------
    // Modal
    // -------------------------------------------------------------------------

    pub fn open_create(&mut self) {
        self.form = F::default();
        self.editing = None;
        self.modal_open = true;
    }

    pub fn open_edit(&mut self, stored: &Stored<F::Entity>) {
        self.form = F::from_record(&stored.record);
        self.editing = Some(EditTarget {
            key: stored.id.clone(),
            label: stored.label().to_string(),
        });
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.editing = None;
        self.form = F::default();
    }

    // -------------------------------------------------------------------------
    // Submit
    // -------------------------------------------------------------------------

    /// Build the mutation for the current form.
    ///
    /// Returns `None` without touching the store when a call is already in
    /// flight or the form does not produce a complete record.
    pub fn begin_submit(&mut self) -> Option<Mutation<F::Entity>> {
        if self.busy {
            return None;
        }
        let record = match self.form.to_record() {
            Ok(record) => record,
            Err(e) => {
                self.toast.error(e.to_string());
                return None;
            }
        };
        self.busy = true;
        Some(match &self.editing {
            Some(target) => Mutation::Update {
                key: target.key.clone(),
                record,
            },
            None => Mutation::Create(record),
        })
    }

    /// Apply the outcome of the call started by [`begin_submit`](Self::begin_submit).
    ///
    /// On failure the modal stays open with the form as typed.
    pub fn finish_submit<T>(&mut self, outcome: ClientResult<T>) -> bool {
        self.busy = false;
        let label = <F::Entity as Entity>::LABEL;
        match outcome {
            Ok(_) => {
                let verb = if self.editing.is_some() {
                    "updated"
                } else {
                    "added"
                };
                self.toast.success(format!("{} {} successfully!", label, verb));
                self.close_modal();
                true
            }
            Err(e) => {
                self.toast.error(format!("Error: {}", e));
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Delete
    // -------------------------------------------------------------------------

    pub fn request_delete(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.confirm.request(key, label);
    }

    pub fn cancel_delete(&mut self) {
        self.confirm.cancel();
    }

    /// Close the confirmation and return the key to delete, if one was pending.
    pub fn begin_delete(&mut self) -> Option<String> {
        if self.busy {
            return None;
        }
        let key = self.confirm.take()?;
        self.busy = true;
        Some(key)
    }

    pub fn finish_delete(&mut self, outcome: ClientResult<()>) -> bool {
        self.busy = false;
        match outcome {
            Ok(()) => {
                self.toast.success(format!(
                    "{} deleted successfully!",
                    <F::Entity as Entity>::LABEL
                ));
                true
            }
            Err(e) => {
                self.toast.error(format!("Error: {}", e));
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // List
    // -------------------------------------------------------------------------

    /// Replace the cached list with a fresh read; a failed read keeps the old list.
    pub fn apply_refresh(&mut self, outcome: ClientResult<Vec<Stored<F::Entity>>>) {
        match outcome {
            Ok(list) => self.list = list,
            Err(e) => self.toast.error(format!("Error: {}", e)),
        }
    }

    /// Find a cached record by store id or natural key.
    pub fn find(&self, key: &str) -> Option<&Stored<F::Entity>> {
        self.list
            .iter()
            .find(|s| s.id == key)
            .or_else(|| self.list.iter().find(|s| s.label() == key))
    }

    // -------------------------------------------------------------------------
    // Async drivers
    // -------------------------------------------------------------------------

    pub async fn refresh<C: RecordClient<F::Entity>>(&mut self, client: &C) {
        let outcome = client.list().await;
        self.apply_refresh(outcome);
    }

    /// Submit the form: update when editing, create otherwise, then refetch.
    pub async fn submit<C: RecordClient<F::Entity>>(&mut self, client: &C) -> bool {
        let Some(mutation) = self.begin_submit() else {
            return false;
        };
        let outcome = match &mutation {
            Mutation::Create(record) => client.create(record).await,
            Mutation::Update { key, record } => client.update(key, record).await,
        };
        let accepted = self.finish_submit(outcome);
        if accepted {
            self.refresh(client).await;
        }
        accepted
    }

    /// Delete the record held by the confirmation dialog, then refetch.
    pub async fn confirm_delete<C: RecordClient<F::Entity>>(&mut self, client: &C) -> bool {
        let Some(key) = self.begin_delete() else {
            return false;
        };
        let outcome = client.remove(&key).await;
        let accepted = self.finish_delete(outcome);
        if accepted {
            self.refresh(client).await;
        }
        accepted
    }
}

impl FormController<TechForm> {
    /// Existing categories for the picker.
    pub fn categories(&self) -> Vec<String> {
        categories(self.list.iter().map(|s| &s.record))
    }

    /// Technologies grouped by category for display.
    pub fn grouped(&self) -> Vec<(String, Vec<Stored<Tech>>)> {
        let mut groups: Vec<(String, Vec<Stored<Tech>>)> = Vec::new();
        for stored in &self.list {
            match groups
                .iter_mut()
                .find(|(name, _)| *name == stored.record.category)
            {
                Some((_, members)) => members.push(stored.clone()),
                None => groups.push((stored.record.category.clone(), vec![stored.clone()])),
            }
        }
        groups
    }

    /// Validate a category rename and return the trimmed target name.
    ///
    /// `None` means nothing is sent: a blank name (reported in the toast),
    /// an unchanged name or a call already in flight.
    pub fn begin_rename(&mut self, from: &str, to: &str) -> Option<String> {
        let to = to.trim();
        if to.is_empty() {
            self.toast.error("Category name is required");
            return None;
        }
        if to == from || self.busy {
            return None;
        }
        self.busy = true;
        Some(to.to_string())
    }

    pub fn finish_rename(&mut self, outcome: ClientResult<usize>) -> bool {
        self.busy = false;
        match outcome {
            Ok(_) => {
                self.toast.success("Category updated successfully!");
                true
            }
            Err(e) => {
                self.toast.error(format!("Error updating category: {}", e));
                false
            }
        }
    }

    /// Rename a category across every member, then refetch.
    pub async fn rename_category<C: CategoryClient>(
        &mut self,
        client: &C,
        from: &str,
        to: &str,
    ) -> bool {
        let Some(to) = self.begin_rename(from, to) else {
            return false;
        };
        let outcome = client.rename_category(from, &to).await;
        let accepted = self.finish_rename(outcome);
        if accepted {
            self.refresh(client).await;
        }
        accepted
    }
}
