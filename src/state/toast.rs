#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Severity of a transient notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    pub fn class_suffix(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A single transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

/// Stack of live notifications, newest last. Every network/backend failure
/// and every success confirmation goes through here; nothing is fatal.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    next_id: u64,
    pub items: Vec<Toast>,
}

impl ToastState {
    /// Push a notification and return its id for later dismissal.
    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, kind, text: text.into() });
        id
    }

    /// Remove a notification by id; unknown ids are a no-op.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}
