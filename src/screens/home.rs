//! Home screen - type or pick a message and copy it.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use ratatui_garnish::{shadow::HalfShadow, GarnishableStatefulWidget, GarnishableWidget, Padding};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::models::{random_sample_index, samples, MessageSource, BUNNY, CHICK};
use crate::services::Theme;

use super::{text_width, Screen, ScreenAction};

const PLACEHOLDER: &str = "Type something to Chickify!";
const SAMPLES_HEADING: &str = "Try using sample messages";

/// Which part of the screen has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Samples,
}

/// The single screen of the app.
pub struct HomeScreen {
    config: Arc<Config>,
    theme: Arc<Theme>,

    // UI state
    focus: Focus,
    input: String,
    /// Cursor position in chars, not bytes
    cursor: usize,
    sample_state: ListState,
}

impl HomeScreen {
    /// Create a new home screen with the input focused.
    pub fn new(config: Arc<Config>, theme: Arc<Theme>) -> Self {
        let mut sample_state = ListState::default();
        sample_state.select(Some(0));

        Self {
            config,
            theme,
            focus: Focus::Input,
            input: String::new(),
            cursor: 0,
            sample_state,
        }
    }

    /// Current input text.
    #[cfg(test)]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Which part of the screen has focus.
    #[cfg(test)]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Index of the highlighted sample.
    #[cfg(test)]
    pub fn selected_sample(&self) -> Option<usize> {
        self.sample_state.selected()
    }

    /// Byte offset of the cursor in `input`.
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.input.insert(idx, c);
        self.cursor += 1;
    }

    fn delete_before_cursor(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.input.remove(idx);
    }

    fn delete_at_cursor(&mut self) {
        if self.cursor < self.char_count() {
            let idx = self.byte_index();
            self.input.remove(idx);
        }
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Move the sample highlight, wrapping at both ends.
    fn move_sample(&mut self, down: bool) {
        let len = samples().len();
        if len == 0 {
            return;
        }
        let selected = self.sample_state.selected().unwrap_or(0);
        let new_index = if down {
            if selected >= len - 1 {
                0
            } else {
                selected + 1
            }
        } else if selected == 0 {
            len - 1
        } else {
            selected - 1
        };
        self.sample_state.select(Some(new_index));
    }

    fn copy_selected_sample(&self) -> ScreenAction {
        match self.sample_state.selected().and_then(|i| samples().get(i)) {
            Some(message) => ScreenAction::Copy {
                text: message.to_string(),
                source: MessageSource::Sample,
            },
            None => ScreenAction::None,
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Enter => {
                if self.input.is_empty() {
                    ScreenAction::None
                } else {
                    ScreenAction::Copy {
                        text: self.input.clone(),
                        source: MessageSource::Typed,
                    }
                }
            }
            KeyCode::Tab | KeyCode::Esc => {
                self.focus = Focus::Samples;
                ScreenAction::None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_input();
                ScreenAction::None
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.insert_char(c);
                ScreenAction::None
            }
            KeyCode::Backspace => {
                self.delete_before_cursor();
                ScreenAction::None
            }
            KeyCode::Delete => {
                self.delete_at_cursor();
                ScreenAction::None
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                ScreenAction::None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                ScreenAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                ScreenAction::None
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn handle_samples_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_sample(false);
                ScreenAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_sample(true);
                ScreenAction::None
            }
            KeyCode::Enter | KeyCode::Char('y') => self.copy_selected_sample(),
            KeyCode::Char('r') => {
                self.sample_state.select(Some(random_sample_index()));
                self.copy_selected_sample()
            }
            KeyCode::Tab | KeyCode::Char('i') | KeyCode::Char('/') => {
                self.focus = Focus::Input;
                ScreenAction::None
            }
            KeyCode::Char('q') | KeyCode::Esc => ScreenAction::Quit,
            _ => ScreenAction::None,
        }
    }
}

#[async_trait]
impl Screen for HomeScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let show_button = !self.input.is_empty();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Input
                Constraint::Length(if show_button { 3 } else { 0 }), // Copy button
                Constraint::Length(2), // Samples heading
                Constraint::Min(0),    // Samples
            ])
            .split(area);

        let background = Block::default().style(Style::default().bg(self.theme.background));
        f.render_widget(background, area);

        let title = Paragraph::new(self.config.display.title.as_str())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(title, chunks[0]);

        // Input field
        let input_focused = self.focus == Focus::Input;
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(if input_focused {
                Style::default().fg(self.theme.accent)
            } else {
                Style::default().fg(self.theme.muted)
            });
        let input_line = if self.input.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(
                self.input.as_str(),
                Style::default().fg(self.theme.foreground),
            ))
        };
        f.render_widget(Paragraph::new(input_line).block(input_block), chunks[1]);

        if input_focused {
            let before: String = self.input.chars().take(self.cursor).collect();
            let offset = text_width(&before);
            let max_x = chunks[1].right().saturating_sub(2);
            let x = chunks[1].x.saturating_add(1).saturating_add(offset).min(max_x);
            f.set_cursor_position((x, chunks[1].y + 1));
        }

        if show_button {
            let button = Paragraph::new("Copy")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL))
                .style(
                    Style::default()
                        .fg(self.theme.background)
                        .bg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                );
            f.render_widget(button.garnish(Padding::horizontal(1)), chunks[2]);
        }

        let heading = Paragraph::new(SAMPLES_HEADING).style(
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(heading.garnish(Padding::horizontal(1)), chunks[3]);

        // Samples list
        let sample_items: Vec<ListItem> = samples()
            .iter()
            .map(|message| {
                ListItem::new(Line::from(vec![
                    Span::raw(CHICK),
                    Span::raw("  "),
                    Span::styled(*message, Style::default().fg(self.theme.accent)),
                    Span::raw("  "),
                    Span::raw(BUNNY),
                ]))
                .style(Style::default().bg(self.theme.card))
            })
            .collect();

        let samples_focused = self.focus == Focus::Samples;
        let samples_block = Block::default()
            .borders(Borders::ALL)
            .border_style(if samples_focused {
                Style::default().fg(self.theme.accent)
            } else {
                Style::default().fg(self.theme.muted)
            });

        let samples_list = List::new(sample_items)
            .block(samples_block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
            .highlight_symbol("► ");

        // Add shadow effect when focused
        if samples_focused {
            let garnished = GarnishableStatefulWidget::garnish(samples_list, HalfShadow::default());
            f.render_stateful_widget(garnished, chunks[4], &mut self.sample_state);
        } else {
            f.render_stateful_widget(samples_list, chunks[4], &mut self.sample_state);
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        debug!(code = ?key.code, focus = ?self.focus, "home screen key");
        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Samples => self.handle_samples_key(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen() -> HomeScreen {
        HomeScreen::new(Arc::new(Config::default()), Arc::new(Theme::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_text(screen: &mut HomeScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c))).await;
        }
    }

    #[tokio::test]
    async fn test_typing_then_enter_copies_typed() {
        let mut screen = screen();
        type_text(&mut screen, "Happy Easter!").await;
        assert_eq!(screen.input(), "Happy Easter!");

        let action = screen.handle_key(key(KeyCode::Enter)).await;
        assert_eq!(
            action,
            ScreenAction::Copy {
                text: "Happy Easter!".to_string(),
                source: MessageSource::Typed,
            }
        );
    }

    #[tokio::test]
    async fn test_enter_on_empty_input_does_nothing() {
        let mut screen = screen();
        assert_eq!(screen.handle_key(key(KeyCode::Enter)).await, ScreenAction::None);
    }

    #[tokio::test]
    async fn test_q_types_in_input() {
        let mut screen = screen();
        let action = screen.handle_key(key(KeyCode::Char('q'))).await;
        assert_eq!(action, ScreenAction::None);
        assert_eq!(screen.input(), "q");
    }

    #[tokio::test]
    async fn test_editing_is_char_aware() {
        let mut screen = screen();
        type_text(&mut screen, "h🐣p").await;
        screen.handle_key(key(KeyCode::Left)).await;
        screen.handle_key(key(KeyCode::Backspace)).await;
        assert_eq!(screen.input(), "hp");

        screen.handle_key(key(KeyCode::Home)).await;
        screen.handle_key(key(KeyCode::Delete)).await;
        assert_eq!(screen.input(), "p");

        screen.handle_key(key(KeyCode::End)).await;
        type_text(&mut screen, "op").await;
        assert_eq!(screen.input(), "pop");

        screen
            .handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
            .await;
        assert_eq!(screen.input(), "");
    }

    #[tokio::test]
    async fn test_sample_navigation_wraps() {
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Tab)).await;
        assert_eq!(screen.focus(), Focus::Samples);

        screen.handle_key(key(KeyCode::Up)).await;
        assert_eq!(screen.selected_sample(), Some(samples().len() - 1));

        screen.handle_key(key(KeyCode::Down)).await;
        assert_eq!(screen.selected_sample(), Some(0));
    }

    #[tokio::test]
    async fn test_enter_on_sample_copies_sample() {
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Esc)).await;
        screen.handle_key(key(KeyCode::Char('j'))).await;

        let action = screen.handle_key(key(KeyCode::Enter)).await;
        assert_eq!(
            action,
            ScreenAction::Copy {
                text: samples()[1].to_string(),
                source: MessageSource::Sample,
            }
        );
    }

    #[tokio::test]
    async fn test_random_sample_copies_selection() {
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Tab)).await;
        let action = screen.handle_key(key(KeyCode::Char('r'))).await;
        let selected = screen.selected_sample().unwrap();
        assert_eq!(
            action,
            ScreenAction::Copy {
                text: samples()[selected].to_string(),
                source: MessageSource::Sample,
            }
        );
    }

    #[tokio::test]
    async fn test_quit_from_samples() {
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Tab)).await;
        assert_eq!(screen.handle_key(key(KeyCode::Char('q'))).await, ScreenAction::Quit);

        screen.handle_key(key(KeyCode::Char('i'))).await;
        assert_eq!(screen.focus(), Focus::Input);
    }

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_render_shows_copy_only_with_input() {
        let mut screen = screen();
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();

        terminal.draw(|f| screen.draw(f, f.area())).unwrap();
        let text = rendered_text(&terminal);
        assert!(text.contains("Easter Messages Hub"));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains(SAMPLES_HEADING));
        assert!(!text.contains("Copy"));

        type_text(&mut screen, "Hi").await;
        terminal.draw(|f| screen.draw(f, f.area())).unwrap();
        assert!(rendered_text(&terminal).contains("Copy"));
    }

    #[test]
    fn test_cursor_after_very_long_input_stays_in_field() {
        let mut screen = screen();
        let len = usize::from(u16::MAX) + 10;
        screen.input = "a".repeat(len);
        screen.cursor = len;

        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| screen.draw(f, f.area())).unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor.x, 58);
        assert_eq!(cursor.y, 3);
    }
}
