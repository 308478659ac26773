//! Gallery widget: cards followed by the load-more control.
//!
//! Content is laid out in rows. Card `i` occupies rows
//! `[i * CARD_HEIGHT, (i + 1) * CARD_HEIGHT)`, the footer (when present) sits
//! directly after the last card. Only the rows inside the viewport are built.

use super::constants::{LOAD_MORE_HEIGHT, LOAD_MORE_WIDTH};
use super::styles::{CARD_TITLE, CARD_TITLE_SELECTED, LOAD_MORE, MUTED_TEXT};
use crate::gallery::{CARD_HEIGHT, GalleryEntry};
use crate::pagination::{FailureKind, LoadMoreMode, LoadState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// What the row after the last card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footer {
    /// Manual trigger, ready to be activated.
    Button,
    /// Automatic trigger, fires when scrolled into view.
    AutoHint,
    /// Next page in flight.
    Loading,
}

impl Footer {
    /// Footer for the given controller state, `None` while the control is hidden.
    pub fn from_state(state: LoadState, trigger_visible: bool, mode: LoadMoreMode) -> Option<Self> {
        if !trigger_visible {
            return None;
        }
        Some(match (state, mode) {
            (LoadState::Loading, _) => Footer::Loading,
            (_, LoadMoreMode::Button) => Footer::Button,
            (_, LoadMoreMode::Auto) => Footer::AutoHint,
        })
    }

    /// Text inside the control.
    pub fn label(&self) -> &'static str {
        match self {
            Footer::Button => "Load more (m)",
            Footer::AutoHint => "Scroll for more",
            Footer::Loading => "Loading...",
        }
    }

    /// Rows occupied below the cards.
    pub fn rows(footer: Option<Footer>) -> usize {
        footer.map_or(0, |_| usize::from(LOAD_MORE_HEIGHT))
    }

    fn line(&self, row: usize) -> Line<'static> {
        let inner = usize::from(LOAD_MORE_WIDTH).saturating_sub(2);
        let text = match row {
            0 => format!("┌{}┐", "─".repeat(inner)),
            1 => format!("│{:^inner$}│", self.label()),
            _ => format!("└{}┘", "─".repeat(inner)),
        };
        Line::styled(text, LOAD_MORE).centered()
    }
}

/// Text shown instead of cards when the gallery is empty.
fn placeholder(state: LoadState) -> &'static str {
    match state {
        LoadState::Idle => "Press / and type a query to search images.",
        LoadState::Loading => "Searching...",
        LoadState::Ready | LoadState::Exhausted => "",
        LoadState::Errored(FailureKind::NoResults) => "No images found.",
        LoadState::Errored(FailureKind::SearchFailed) => {
            "Search failed. Press / to try again."
        }
    }
}

fn card_line(entry: &GalleryEntry, index: usize, row: usize, selected: bool) -> Line<'_> {
    match row {
        0 => {
            let style = if selected {
                CARD_TITLE_SELECTED
            } else {
                CARD_TITLE
            };
            Line::from(vec![
                Span::styled(format!(" #{} ", index + 1), style),
                Span::raw(" "),
                Span::styled(entry.alt.as_str(), CARD_TITLE),
            ])
        }
        1 => Line::from(Span::styled(format!("    {}", entry.preview_url), MUTED_TEXT)),
        2 => Line::from(format!("    {}", entry.info_line())),
        _ => Line::default(),
    }
}

/// Visible slice of the gallery.
pub struct GalleryView<'a> {
    entries: &'a [GalleryEntry],
    offset: usize,
    footer: Option<Footer>,
    state: LoadState,
    selected: Option<usize>,
}

impl<'a> GalleryView<'a> {
    /// View `entries` scrolled to `offset` rows.
    pub fn new(entries: &'a [GalleryEntry], offset: usize, state: LoadState) -> Self {
        Self {
            entries,
            offset,
            footer: None,
            state,
            selected: None,
        }
    }

    /// Draw `footer` after the last card.
    pub fn footer(mut self, footer: Option<Footer>) -> Self {
        self.footer = footer;
        self
    }

    /// Highlight the card the zoom overlay would open.
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    fn visible_lines(&self, rows: usize) -> Vec<Line<'a>> {
        let entries = self.entries;
        if entries.is_empty() {
            return vec![Line::styled(placeholder(self.state), MUTED_TEXT)];
        }

        let card = usize::from(CARD_HEIGHT);
        let content_rows = entries.len() * card;
        let total = content_rows + Footer::rows(self.footer);

        (self.offset..total.min(self.offset.saturating_add(rows)))
            .map(|row| {
                if row < content_rows {
                    let index = row / card;
                    let selected = self.selected == Some(index);
                    card_line(&entries[index], index, row % card, selected)
                } else {
                    self.footer
                        .map(|f| f.line(row - content_rows))
                        .unwrap_or_default()
                }
            })
            .collect()
    }
}

impl Widget for GalleryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.entries.is_empty() {
            " Results ".to_string()
        } else {
            format!(" Results ({}) ", self.entries.len())
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let rows = usize::from(block.inner(area).height);

        Paragraph::new(self.visible_lines(rows))
            .block(block)
            .render(area, buf);
    }
}
