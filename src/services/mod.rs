//! Backend services.

pub mod clipboard;
pub mod notification;
pub mod publisher;
pub mod theme;

pub use clipboard::{ClipboardError, ClipboardSink, MemoryClipboard, SystemClipboard};
pub use notification::{Toast, ToastKind};
pub use publisher::{ClipboardPublisher, PublishError};
pub use theme::Theme;
