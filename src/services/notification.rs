//! Transient toast notifications.

use std::time::{Duration, Instant};

/// Kind of toast, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// A short-lived, auto-dismissing message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    /// Create an informational toast.
    pub fn info(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(text.into(), ToastKind::Info, duration)
    }

    /// Create an error toast.
    pub fn error(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(text.into(), ToastKind::Error, duration)
    }

    fn new(text: String, kind: ToastKind, duration: Duration) -> Self {
        Self {
            text,
            kind,
            created_at: Instant::now(),
            duration,
        }
    }

    /// When the toast was created.
    #[cfg(test)]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Whether the toast should be gone at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }

    /// Whether the toast should be gone by now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
