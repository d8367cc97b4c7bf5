//! User notifications raised by forms and list actions.
//!
//! Controllers queue toasts; the outer shell drains and renders them.

/// Toast notification level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A toast notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Title to display (single line)
    pub title: String,
    /// Optional body text (can be multi-line)
    pub body: Option<String>,
    /// Toast level (affects styling)
    pub level: ToastLevel,
}

impl Toast {
    /// Create an error toast
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            level: ToastLevel::Error,
        }
    }

    /// Create a success toast
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            level: ToastLevel::Success,
        }
    }

    /// Add a body to the toast
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns `true` for error toasts.
    pub fn is_error(&self) -> bool {
        self.level == ToastLevel::Error
    }
}

/// Queue of toasts waiting to be shown.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    pending: Vec<Toast>,
}

impl ToastQueue {
    /// Queues a toast.
    pub fn push(&mut self, toast: Toast) {
        log::debug!("toast ({:?}): {}", toast.level, toast.title);
        self.pending.push(toast);
    }

    /// Returns the queued toasts without removing them.
    pub fn pending(&self) -> &[Toast] {
        &self.pending
    }

    /// Removes and returns every queued toast.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.pending)
    }
}
