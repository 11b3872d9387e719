//! Portfolio content domain shared by the server, the CLI and the frontend.
//!
//! # Architecture
//!
//! - `models`: records (Project, BlogPost, Tech, Resume) and the `Entity` trait
//! - `form`: editable form buffers and their record conversion
//! - `client`: the client-side store traits the controllers talk to
//! - `contact`: footer contact links
//! - `controller`: the generic entity form controller
//! - `feedback`: toast and confirmation dialog state
//! - `session`: the admin auth gate
//! - `upload`: resume upload checks

pub mod client;
pub mod contact;
pub mod controller;
pub mod feedback;
pub mod form;
pub mod models;
pub mod session;
pub mod upload;

#[cfg(test)]
mod models_test;

pub use client::{
    Authenticator, CategoryClient, ClientError, ClientResult, ErrorBody, RecordClient,
    encode_segment,
};
pub use contact::{CONTACT_LINKS, ContactLink, copyright_notice};
pub use controller::{EditTarget, FormController, Mutation};
pub use feedback::{AUTO_DISMISS, ConfirmDialog, Toast, ToastKind};
pub use form::{BlogForm, EntityForm, ProjectForm, TechForm, join_list, split_list};
pub use models::*;
pub use session::{AuthGate, MemorySession, SESSION_KEY, SessionStorage};
pub use upload::{MAX_RESUME_BYTES, PDF_MIME, UploadError, validate_resume};
