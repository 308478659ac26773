//! Help overlay listing keyboard shortcuts.
//!
//! Triggered by '?', dismissed by 'Esc', '?' or 'q'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::layout::centered_rect;
use super::styles::{KEY_HINT, MUTED_TEXT, SECTION_HEADER};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Search",
        &[
            ("/", "Focus search box"),
            ("Enter", "Submit query (in search box)"),
            ("Esc", "Leave search box"),
        ],
    ),
    (
        "Gallery",
        &[
            ("j/↓  k/↑", "Scroll"),
            ("Ctrl+d/PgDn", "Page down"),
            ("Ctrl+u/PgUp", "Page up"),
            ("g/Home  G/End", "Top / bottom"),
            ("m", "Load more (button mode)"),
        ],
    ),
    (
        "Zoom",
        &[
            ("Enter/o", "Open highlighted image"),
            ("h/←  l/→", "Previous / next image"),
            ("Esc", "Close"),
        ],
    ),
    ("Application", &[("?", "Toggle help"), ("q/Ctrl+c", "Quit")]),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content())
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: popup_area.height.min(1),
    };
    let hint = Paragraph::new(Line::from(Span::styled(" Press Esc or ? to close ", MUTED_TEXT)))
        .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, (title, keys)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*title, SECTION_HEADER)));
        for (key, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<16}"), KEY_HINT),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn help_lists_load_more_key() {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(render_help_overlay).unwrap();

        let all: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(all.contains("Keyboard Shortcuts"));
        assert!(all.contains("Load more (button mode)"));
        assert!(all.contains("Press Esc or ? to close"));
    }

    #[test]
    fn every_section_has_a_heading() {
        let headings: Vec<String> = build_help_content()
            .iter()
            .filter(|l| l.spans.len() == 1 && !l.spans[0].content.is_empty())
            .map(|l| l.spans[0].content.to_string())
            .collect();
        assert_eq!(headings, vec!["Search", "Gallery", "Zoom", "Application"]);
    }
}
