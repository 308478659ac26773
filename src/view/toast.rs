//! Toast stack in the top-right corner.

use super::constants::TOAST_WIDTH;
use super::styles::severity_style;
use crate::notify::Toast;
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// Rows a toast needs when wrapped to `width` columns, border included.
pub fn toast_height(message: &str, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2)).max(1);
    let lines = message.width().div_ceil(inner).max(1);
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
}

/// Draw `toasts` oldest first, top to bottom, inside `area`.
///
/// Toasts that do not fit are skipped.
pub fn render_toasts(frame: &mut Frame, area: Rect, toasts: &[Toast]) {
    let width = TOAST_WIDTH.min(area.width);
    if width < 3 {
        return;
    }
    let x = area.x + area.width - width;
    let mut y = area.y;
    let bottom = area.y.saturating_add(area.height);

    for toast in toasts {
        let height = toast_height(&toast.message, width);
        if y.saturating_add(height) > bottom {
            break;
        }
        let rect = Rect::new(x, y, width, height);

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.message.as_str())
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(severity_style(toast.severity)),
                ),
            rect,
        );
        y += height;
    }
}
