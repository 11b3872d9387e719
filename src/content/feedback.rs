//! Toast and confirmation dialog state.

use std::time::Duration;

/// How long a toast stays up before it dismisses itself.
pub const AUTO_DISMISS: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

/// A transient status message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub visible: bool,
}

impl Toast {
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.message = message.into();
        self.kind = kind;
        self.visible = true;
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, ToastKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, ToastKind::Error);
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn is_error(&self) -> bool {
        self.visible && self.kind == ToastKind::Error
    }
}

/// Delete confirmation: nothing is removed until the dialog is confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub open: bool,
    pub key: Option<String>,
    pub label: String,
}

impl ConfirmDialog {
    pub fn request(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.open = true;
        self.key = Some(key.into());
        self.label = label.into();
    }

    /// Close the dialog and hand back the key that was confirmed.
    pub fn take(&mut self) -> Option<String> {
        let key = self.key.take();
        self.cancel();
        key
    }

    pub fn cancel(&mut self) {
        self.open = false;
        self.key = None;
        self.label.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_show_and_dismiss() {
        let mut toast = Toast::default();
        assert!(!toast.visible);

        toast.error("boom");
        assert!(toast.visible);
        assert!(toast.is_error());
        assert_eq!(toast.message, "boom");

        toast.dismiss();
        assert!(!toast.visible);
        assert!(!toast.is_error());
    }

    #[test]
    fn confirm_take_clears_dialog() {
        let mut dialog = ConfirmDialog::default();
        dialog.request("abc", "My Project");
        assert!(dialog.open);
        assert_eq!(dialog.label, "My Project");

        assert_eq!(dialog.take().as_deref(), Some("abc"));
        assert!(!dialog.open);
        assert_eq!(dialog.take(), None);
    }

    #[test]
    fn confirm_cancel_discards_key() {
        let mut dialog = ConfirmDialog::default();
        dialog.request("abc", "My Project");
        dialog.cancel();
        assert_eq!(dialog, ConfirmDialog::default());
    }
}
