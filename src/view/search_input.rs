//! Search input state and widget.

use super::styles::MUTED_TEXT;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Text typed into the search box.
///
/// `cursor` counts chars, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInputState {
    text: String,
    cursor: usize,
    focused: bool,
}

impl SearchInputState {
    /// Unfocused input pre-filled with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            focused: false,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True while keys edit the text.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Focus the input with the cursor at the end.
    pub fn focus(&mut self) {
        self.focused = true;
        self.cursor = self.text.chars().count();
    }

    /// Stop editing.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Insert `c` at the cursor.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.text.remove(at);
        }
    }

    /// Move the cursor one char left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one char right.
    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

/// Search bar widget.
pub struct SearchInput<'a> {
    state: &'a SearchInputState,
}

impl<'a> SearchInput<'a> {
    /// Widget drawing `state`.
    pub fn new(state: &'a SearchInputState) -> Self {
        Self { state }
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;

        let line = if state.focused {
            let before: String = state.text.chars().take(state.cursor).collect();
            let mut rest = state.text.chars().skip(state.cursor);
            let under = rest.next().map_or(" ".to_string(), |c| c.to_string());
            let after: String = rest.collect();

            Line::from(vec![
                Span::raw(before),
                Span::styled(
                    under,
                    Style::default()
                        .bg(Color::White)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(after),
            ])
        } else if state.text.is_empty() {
            Line::from(Span::styled("Press / to search images", MUTED_TEXT))
        } else {
            Line::from(state.text.as_str())
        };

        let border = if state.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Search ")
                    .border_style(border),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &SearchInputState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(SearchInput::new(state), frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, 1)].symbol().to_string())
            .collect()
    }

    #[test]
    fn editing_is_char_based() {
        let mut state = SearchInputState::new("café");
        state.focus();
        state.backspace();
        state.insert('e');
        assert_eq!(state.text(), "cafe");

        state.move_home();
        state.delete();
        state.insert('s');
        assert_eq!(state.text(), "safe");
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut state = SearchInputState::new("ab");
        state.move_right();
        assert_eq!(state.cursor(), 2);
        state.move_home();
        state.move_left();
        assert_eq!(state.cursor(), 0);
        state.backspace();
        assert_eq!(state.text(), "ab");
    }

    #[test]
    fn focus_moves_cursor_to_end() {
        let mut state = SearchInputState::default();
        state.insert('x');
        state.move_home();
        state.focus();
        assert!(state.is_focused());
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn unfocused_empty_input_shows_hint() {
        let row = render(&SearchInputState::default());
        assert!(row.contains("Press / to search"), "got {row:?}");
    }

    #[test]
    fn focused_input_shows_text() {
        let mut state = SearchInputState::new("cats");
        state.focus();
        let row = render(&state);
        assert!(row.contains("cats"), "got {row:?}");
    }
}
