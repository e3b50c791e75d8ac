//! Publishing decorated messages to the clipboard.

use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{decorate, MessageSource};
use crate::services::clipboard::{ClipboardError, ClipboardSink};
use crate::services::notification::Toast;

/// Failures of the copy flow.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Nothing to copy; the clipboard is left untouched.
    #[error("nothing to copy")]
    EmptyInput,
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Writes decorated messages to a clipboard and builds the confirmation toast.
pub struct ClipboardPublisher<C> {
    clipboard: C,
    toast_duration: Duration,
}

impl<C: ClipboardSink> ClipboardPublisher<C> {
    /// Create a publisher whose toasts last `toast_duration`.
    pub fn new(clipboard: C, toast_duration: Duration) -> Self {
        Self {
            clipboard,
            toast_duration,
        }
    }

    /// Put `decorated` on the clipboard and return the confirmation toast.
    ///
    /// Callers are expected to skip empty messages; this does not check.
    pub fn publish(
        &mut self,
        decorated: &str,
        raw_for_notification: &str,
        source: MessageSource,
    ) -> Result<Toast, ClipboardError> {
        let label = source.label();
        if let Err(e) = self.clipboard.write(label, decorated) {
            warn!(label, error = %e, "clipboard write failed");
            return Err(e);
        }
        info!(label, %source, bytes = decorated.len(), "message copied");

        Ok(Toast::info(
            notification_text(raw_for_notification),
            self.toast_duration,
        ))
    }

    /// Decorate `raw` and publish it, refusing empty input.
    pub fn copy_message(&mut self, raw: &str, source: MessageSource) -> Result<Toast, PublishError> {
        if raw.is_empty() {
            return Err(PublishError::EmptyInput);
        }
        let decorated = decorate(raw);
        Ok(self.publish(&decorated, raw, source)?)
    }

    /// Toast lifetime used for confirmations.
    pub fn toast_duration(&self) -> Duration {
        self.toast_duration
    }

    /// The underlying clipboard.
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }
}

/// Confirmation text shown after a copy.
pub fn notification_text(raw: &str) -> String {
    format!("{} : Copied!", raw)
}
