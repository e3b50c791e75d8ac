//! TUI screens.

pub mod home;

pub use home::HomeScreen;

use async_trait::async_trait;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::Frame;

use crate::models::MessageSource;

/// Action returned by screen key handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// No action needed.
    None,
    /// Decorate `text` and put it on the clipboard.
    Copy { text: String, source: MessageSource },
    /// Leave the application.
    Quit,
}

/// Trait for screen implementations.
#[async_trait]
pub trait Screen {
    /// Draw the screen.
    fn draw(&mut self, f: &mut Frame, area: Rect);

    /// Handle a key event.
    async fn handle_key(&mut self, key: KeyEvent) -> ScreenAction;
}

/// Display width of `text` in terminal columns, saturating at `u16::MAX`.
pub fn text_width(text: &str) -> u16 {
    u16::try_from(Line::from(text).width()).unwrap_or(u16::MAX)
}
