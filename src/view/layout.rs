//! Screen layout.

use super::constants::{SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT};
use ratatui::layout::{Constraint, Layout, Rect};

/// Areas of the main screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Search bar
    pub search: Rect,
    /// Gallery pane, border included
    pub gallery: Rect,
    /// Status bar
    pub status: Rect,
}

impl AppLayout {
    /// Split `area` into the three panes.
    pub fn new(area: Rect) -> Self {
        let [search, gallery, status] = Layout::vertical([
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);

        Self {
            search,
            gallery,
            status,
        }
    }

    /// Gallery area inside its border.
    pub fn gallery_inner(&self) -> Rect {
        Rect {
            x: self.gallery.x.saturating_add(1),
            y: self.gallery.y.saturating_add(1),
            width: self.gallery.width.saturating_sub(2),
            height: self.gallery.height.saturating_sub(2),
        }
    }
}

/// Rect centered in `area` covering the given percentages of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_takes_remaining_height() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.search.height, 3);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.gallery, Rect::new(0, 3, 80, 20));
        assert_eq!(layout.gallery_inner(), Rect::new(1, 4, 78, 18));
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let layout = AppLayout::new(Rect::new(0, 0, 1, 2));
        assert_eq!(layout.gallery_inner().height, 0);
    }

    #[test]
    fn centered_rect_is_centered() {
        let rect = centered_rect(50, 50, Rect::new(0, 0, 80, 20));
        assert_eq!(rect, Rect::new(20, 5, 40, 10));
    }
}
