//! Zoom overlay rendering.

use super::constants::{LIGHTBOX_HEIGHT_PERCENT, LIGHTBOX_WIDTH_PERCENT};
use super::layout::centered_rect;
use super::styles::MUTED_TEXT;
use crate::gallery::Lightbox;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::time::Instant;

/// Draw the opened lightbox item over the screen. No-op when closed.
pub fn render_lightbox(frame: &mut Frame, lightbox: &Lightbox, now: Instant) {
    let (Some(index), Some(item)) = (lightbox.current_index(), lightbox.current()) else {
        return;
    };

    let area = centered_rect(LIGHTBOX_WIDTH_PERCENT, LIGHTBOX_HEIGHT_PERCENT, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            item.url.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED),
        )),
        Line::default(),
    ];
    if let Some(caption) = lightbox.visible_caption(now) {
        lines.push(Line::from(Span::styled(
            caption,
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "←/→ browse · Esc close",
        MUTED_TEXT,
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" Image {}/{} ", index + 1, lightbox.len())),
        );
    frame.render_widget(paragraph, area);
}
