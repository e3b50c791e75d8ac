//! Main application state and event loop.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::MessageSource;
use crate::screens::{text_width, HomeScreen, Screen, ScreenAction};
use crate::services::{ClipboardPublisher, ClipboardSink, PublishError, Theme, Toast, ToastKind};

/// Application state.
pub struct App {
    should_quit: bool,

    home_screen: HomeScreen,
    publisher: ClipboardPublisher<Box<dyn ClipboardSink>>,
    theme: Arc<Theme>,

    // Transient notification
    toast: Option<Toast>,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: Config, clipboard: Box<dyn ClipboardSink>) -> Self {
        let theme = Arc::new(Theme::load(config.theme_path().as_deref()));
        let publisher = ClipboardPublisher::new(clipboard, config.toast_duration());
        let config = Arc::new(config);

        let home_screen = HomeScreen::new(config.clone(), theme.clone());

        Self {
            should_quit: false,
            home_screen,
            publisher,
            theme,
            toast: None,
        }
    }

    /// Run the application.
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        info!("tui started");

        // Main event loop
        let result = self.event_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Main event loop.
    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            self.expire_toast();

            // Draw UI
            terminal.draw(|f| self.draw(f))?;

            // Poll for events with timeout; the timeout also drives toast expiry
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    // Global key handlers
                    match (key.modifiers, key.code) {
                        (KeyModifiers::CONTROL, KeyCode::Char('c'))
                        | (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                            self.should_quit = true;
                        }
                        _ => {
                            let action = self.home_screen.handle_key(key).await;
                            self.apply_action(action);
                        }
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Carry out an action returned by the screen.
    fn apply_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::Copy { text, source } => self.copy(&text, source),
        }
    }

    /// Publish a message and replace the current toast with the outcome.
    fn copy(&mut self, text: &str, source: MessageSource) {
        let duration = self.publisher.toast_duration();
        self.toast = match self.publisher.copy_message(text, source) {
            Ok(toast) => Some(toast),
            Err(PublishError::EmptyInput) => {
                debug!("empty message, nothing copied");
                None
            }
            Err(PublishError::Clipboard(e)) => Some(Toast::error(format!("Copy failed: {}", e), duration)),
        };
    }

    /// Drop the toast once its time is up.
    fn expire_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Draw the UI.
    fn draw(&mut self, f: &mut ratatui::Frame) {
        use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
        use ratatui::style::{Color, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::{Block, Borders, Clear, Paragraph};

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.home_screen.draw(f, chunks[0]);

        // Status bar
        let status = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled("Enter", Style::default().fg(Color::DarkGray)),
            Span::styled(" Copy", Style::default().fg(Color::Gray)),
            Span::raw(" │ "),
            Span::styled("Tab", Style::default().fg(Color::DarkGray)),
            Span::styled(" Focus", Style::default().fg(Color::Gray)),
            Span::raw(" │ "),
            Span::styled("r", Style::default().fg(Color::DarkGray)),
            Span::styled(" Random", Style::default().fg(Color::Gray)),
            Span::raw(" │ "),
            Span::styled("Ctrl+Q", Style::default().fg(Color::DarkGray)),
            Span::styled(" Quit", Style::default().fg(Color::Gray)),
        ]));
        f.render_widget(status, chunks[1]);

        // Toast, centred just above the status bar
        if let Some(toast) = &self.toast {
            let content = chunks[0];
            let width = text_width(&toast.text).saturating_add(4).min(content.width);
            let height = 3.min(content.height);
            let area = Rect {
                x: content.x + (content.width - width) / 2,
                y: content.bottom().saturating_sub(height + 1).max(content.y),
                width,
                height,
            };
            let color = match toast.kind {
                ToastKind::Info => self.theme.accent,
                ToastKind::Error => Color::Red,
            };
            let widget = Paragraph::new(toast.text.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(color).bg(self.theme.background))
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
            f.render_widget(Clear, area);
            f.render_widget(widget, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ClipboardError, MemoryClipboard};
    use std::sync::Mutex;

    /// Memory clipboard the test can still read after handing it to the app.
    #[derive(Clone, Default)]
    struct SharedClipboard(Arc<Mutex<MemoryClipboard>>);

    impl ClipboardSink for SharedClipboard {
        fn write(&mut self, label: &str, text: &str) -> Result<(), ClipboardError> {
            self.0.lock().unwrap().write(label, text)
        }
    }

    struct BrokenClipboard;

    impl ClipboardSink for BrokenClipboard {
        fn write(&mut self, _label: &str, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no display".to_string()))
        }
    }

    #[test]
    fn test_copy_action_publishes_and_toasts() {
        let clipboard = SharedClipboard::default();
        let mut app = App::new(Config::default(), Box::new(clipboard.clone()));

        app.apply_action(ScreenAction::Copy {
            text: "Happy Easter!".to_string(),
            source: MessageSource::Typed,
        });

        let memory = clipboard.0.lock().unwrap();
        assert_eq!(memory.contents(), Some("🐣🐰 Happy Easter! 🐰🐣 "));
        assert_eq!(memory.label(), Some("EasterMessage"));
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.text, "Happy Easter! : Copied!");
        assert_eq!(toast.kind, ToastKind::Info);
    }

    #[test]
    fn test_second_sample_replaces_first() {
        let clipboard = SharedClipboard::default();
        let mut app = App::new(Config::default(), Box::new(clipboard.clone()));

        for text in ["Some bunny loves you", "Happy Easter!"] {
            app.apply_action(ScreenAction::Copy {
                text: text.to_string(),
                source: MessageSource::Sample,
            });
        }

        let memory = clipboard.0.lock().unwrap();
        assert_eq!(memory.contents(), Some("🐣🐰 Happy Easter! 🐰🐣 "));
        assert_eq!(memory.label(), Some("CopiedMessage"));
        assert_eq!(app.toast.as_ref().unwrap().text, "Happy Easter! : Copied!");
    }

    #[test]
    fn test_clipboard_failure_becomes_error_toast() {
        let mut app = App::new(Config::default(), Box::new(BrokenClipboard));
        app.apply_action(ScreenAction::Copy {
            text: "Happy Easter!".to_string(),
            source: MessageSource::Typed,
        });

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(toast.text.contains("clipboard unavailable"));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_action() {
        let mut app = App::new(Config::default(), Box::new(MemoryClipboard::new()));
        app.apply_action(ScreenAction::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_expired_toast_is_dropped() {
        let mut config = Config::default();
        config.notification.duration_ms = 0;
        let mut app = App::new(config, Box::new(MemoryClipboard::new()));

        app.apply_action(ScreenAction::Copy {
            text: "Hop".to_string(),
            source: MessageSource::Typed,
        });
        assert!(app.toast.is_some());

        app.expire_toast();
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_draw_survives_toast_wider_than_u16() {
        use ratatui::backend::TestBackend;

        let mut app = App::new(Config::default(), Box::new(MemoryClipboard::new()));
        app.apply_action(ScreenAction::Copy {
            text: "a".repeat(usize::from(u16::MAX) + 10),
            source: MessageSource::Typed,
        });
        assert!(app.toast.is_some());

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
    }
}
