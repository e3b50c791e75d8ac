//! Clipboard operations.

use thiserror::Error;
use tracing::debug;

/// Clipboard failures surfaced to callers.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The platform clipboard could not be opened.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// The clipboard was opened but rejected the write.
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Something that can hold a labelled piece of text.
pub trait ClipboardSink {
    /// Replace the current contents with `text`.
    fn write(&mut self, label: &str, text: &str) -> Result<(), ClipboardError>;
}

impl<T: ClipboardSink + ?Sized> ClipboardSink for Box<T> {
    fn write(&mut self, label: &str, text: &str) -> Result<(), ClipboardError> {
        (**self).write(label, text)
    }
}

/// System clipboard backed by arboard.
///
/// The handle is opened on first write and kept, since on X11 the copied text
/// only stays available while its owner is alive.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
    hold_until_replaced: bool,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes block until another application takes the
    /// selection over. Used when the process exits right after copying.
    pub fn holding_until_replaced() -> Self {
        Self {
            handle: None,
            hold_until_replaced: true,
        }
    }

    /// Whether writes block until the selection is replaced.
    pub fn holds_until_replaced(&self) -> bool {
        self.hold_until_replaced
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.handle.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.handle = Some(clipboard);
        }
        self.handle
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("no clipboard handle".to_string()))
    }
}

#[cfg(target_os = "linux")]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str, hold: bool) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    if hold {
        clipboard.set().wait().text(text)
    } else {
        clipboard.set_text(text)
    }
}

#[cfg(not(target_os = "linux"))]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str, _hold: bool) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

impl ClipboardSink for SystemClipboard {
    fn write(&mut self, label: &str, text: &str) -> Result<(), ClipboardError> {
        // arboard has no notion of clip labels; the label only goes to the log.
        debug!(label, hold = self.hold_until_replaced, "writing to system clipboard");
        let hold = self.hold_until_replaced;
        let clipboard = self.handle()?;
        if let Err(e) = set_text(clipboard, text, hold) {
            // A stale handle (e.g. the display server restarted) is not reused.
            self.handle = None;
            return Err(ClipboardError::Write(e.to_string()));
        }
        Ok(())
    }
}

/// In-process clipboard that records every write.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    writes: Vec<(String, String)>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents, i.e. the text of the last write.
    pub fn contents(&self) -> Option<&str> {
        self.writes.last().map(|(_, text)| text.as_str())
    }

    /// Label of the last write.
    #[cfg(test)]
    pub fn label(&self) -> Option<&str> {
        self.writes.last().map(|(label, _)| label.as_str())
    }

    /// Every `(label, text)` pair written so far, oldest first.
    #[cfg(test)]
    pub fn history(&self) -> &[(String, String)] {
        &self.writes
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write(&mut self, label: &str, text: &str) -> Result<(), ClipboardError> {
        self.writes.push((label.to_string(), text.to_string()));
        Ok(())
    }
}
