mod confirm;
mod modal;
mod toast;

pub use confirm::ConfirmDeleteDialog;
pub use modal::Modal;
pub use toast::ToastBanner;
