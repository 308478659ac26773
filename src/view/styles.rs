//! Shared styles.

use crate::notify::Severity;
use ratatui::style::{Color, Modifier, Style};

/// Card heading: index and tags.
pub const CARD_TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Card heading of the card the zoom overlay would open.
pub const CARD_TITLE_SELECTED: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

/// Secondary text: URLs, hints, placeholders.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Section headings in overlays.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Keys in the help overlay.
pub const KEY_HINT: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Load-more control.
pub const LOAD_MORE: Style = Style::new().fg(Color::Yellow);

/// Border color for a toast of the given severity.
pub fn severity_style(severity: Severity) -> Style {
    let color = match severity {
        Severity::Info => Color::Blue,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Failure => Color::Red,
    };
    Style::new().fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_have_distinct_colors() {
        let colors: std::collections::HashSet<_> = [
            Severity::Info,
            Severity::Success,
            Severity::Warning,
            Severity::Failure,
        ]
        .into_iter()
        .map(|s| severity_style(s).fg)
        .collect();
        assert_eq!(colors.len(), 4);
    }
}
