//! Status bar: query, progress, controller state.

use crate::pagination::{LoadMoreMode, LoadState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Snapshot of what the status bar shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBar<'a> {
    /// Current query
    pub query: Option<&'a str>,
    /// Cards displayed
    pub shown: usize,
    /// Total reported by the API
    pub total: Option<u64>,
    /// Last rendered page
    pub page: u32,
    /// Controller state
    pub state: LoadState,
    /// Load-more mode
    pub mode: LoadMoreMode,
}

impl StatusBar<'_> {
    fn text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(query) = self.query {
            parts.push(format!("\"{query}\""));
        }
        match self.total {
            Some(total) => parts.push(format!("{}/{} images", self.shown, total)),
            None if self.shown > 0 => parts.push(format!("{} images", self.shown)),
            None => {}
        }
        if self.page > 0 {
            parts.push(format!("page {}", self.page));
        }
        parts.push(self.state.label().to_string());
        parts.push(
            match self.mode {
                LoadMoreMode::Button => "button",
                LoadMoreMode::Auto => "auto",
            }
            .to_string(),
        );
        parts.push("? help".to_string());
        parts.join(" | ")
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(
                " pixgal ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(self.text()),
        ]);
        Paragraph::new(line)
            .style(Style::default().bg(Color::DarkGray))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_status() {
        let bar = StatusBar {
            query: None,
            shown: 0,
            total: None,
            page: 0,
            state: LoadState::Idle,
            mode: LoadMoreMode::Button,
        };
        insta::assert_snapshot!(bar.text(), @"idle | button | ? help");
    }

    #[test]
    fn status_mid_search() {
        let bar = StatusBar {
            query: Some("cats"),
            shown: 80,
            total: Some(85),
            page: 2,
            state: LoadState::Ready,
            mode: LoadMoreMode::Auto,
        };
        insta::assert_snapshot!(bar.text(), @r#""cats" | 80/85 images | page 2 | ready | auto | ? help"#);
    }
}
