//! Gallery of rendered image cards (pure).
//!
//! [`GalleryRenderer`] is the capability the pagination controller drives.
//! [`Gallery`] is the terminal implementation: an append-only list of cards
//! with a scroll position and a pending scroll request that the view resolves
//! once it knows the viewport height.

pub mod entry;
pub mod lightbox;

pub use entry::{CARD_HEIGHT, GalleryEntry};
pub use lightbox::{Lightbox, LightboxConfig, ZoomOverlay};

use crate::model::ImageRecord;
use tracing::debug;

/// Rendering capability driven by the pagination controller.
pub trait GalleryRenderer {
    /// Remove every displayed entry.
    fn reset(&mut self);

    /// Append entries for `records` at the end, in input order.
    fn append(&mut self, records: &[ImageRecord]);
}

/// Scroll requested by the last append, resolved at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollIntent {
    /// First page of a session: move down two card heights so the first
    /// results sit just below the fold.
    BelowFold,
    /// Later pages: align the last card with the bottom of the viewport.
    /// Anything drawn after the cards stays just below the fold.
    RevealNewest,
}

/// Append-only gallery with a zoom overlay kept in sync.
#[derive(Debug, Clone)]
pub struct Gallery<O: ZoomOverlay> {
    entries: Vec<GalleryEntry>,
    overlay: O,
    scroll_offset: usize,
    pending_scroll: Option<ScrollIntent>,
    appended_since_reset: bool,
}

impl<O: ZoomOverlay> Gallery<O> {
    /// Create an empty gallery that keeps `overlay` in sync.
    pub fn new(overlay: O) -> Self {
        Self {
            entries: Vec::new(),
            overlay,
            scroll_offset: 0,
            pending_scroll: None,
            appended_since_reset: false,
        }
    }

    /// Displayed entries, in append order.
    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// Number of displayed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are displayed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The zoom overlay.
    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Mutable zoom overlay, for navigation.
    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    /// Rows occupied by the cards.
    pub fn content_rows(&self) -> usize {
        self.entries.len() * CARD_HEIGHT as usize
    }

    /// Current top row of the viewport.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Scroll request waiting for the next draw.
    pub fn pending_scroll(&self) -> Option<ScrollIntent> {
        self.pending_scroll
    }

    /// Index of the first card whose top row is inside the viewport.
    pub fn first_visible_entry(&self) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let card = CARD_HEIGHT as usize;
        let index = self.scroll_offset.div_ceil(card);
        Some(index.min(self.entries.len() - 1))
    }

    /// Scroll up, stopping at the top.
    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    /// Scroll down. Clamped on the next [`Gallery::resolve_scroll`].
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows);
    }

    /// Jump to the first card.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Jump to the end. Clamped on the next [`Gallery::resolve_scroll`].
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = usize::MAX;
    }

    /// Apply the pending scroll request and clamp the offset.
    ///
    /// `total_rows` is the scrollable height including anything the view
    /// draws after the cards (the load-more control).
    pub fn resolve_scroll(&mut self, viewport_rows: usize, total_rows: usize) -> usize {
        let max_offset = total_rows.saturating_sub(viewport_rows);

        match self.pending_scroll.take() {
            Some(ScrollIntent::BelowFold) => {
                self.scroll_offset = self
                    .scroll_offset
                    .saturating_add(2 * CARD_HEIGHT as usize);
            }
            Some(ScrollIntent::RevealNewest) => {
                self.scroll_offset = self.content_rows().saturating_sub(viewport_rows);
            }
            None => {}
        }

        self.scroll_offset = self.scroll_offset.min(max_offset);
        self.scroll_offset
    }
}

impl<O: ZoomOverlay> GalleryRenderer for Gallery<O> {
    fn reset(&mut self) {
        self.entries.clear();
        self.scroll_offset = 0;
        self.pending_scroll = None;
        self.appended_since_reset = false;
        self.overlay.refresh(&self.entries);
    }

    fn append(&mut self, records: &[ImageRecord]) {
        self.entries.extend(records.iter().map(GalleryEntry::from));
        self.overlay.refresh(&self.entries);

        if records.is_empty() {
            return;
        }

        let intent = if self.appended_since_reset {
            ScrollIntent::RevealNewest
        } else {
            ScrollIntent::BelowFold
        };
        self.appended_since_reset = true;
        self.pending_scroll = Some(intent);

        debug!(
            appended = records.len(),
            total = self.entries.len(),
            ?intent,
            "Gallery entries appended"
        );
    }
}

#[cfg(test)]
#[path = "gallery_tests.rs"]
mod tests;
