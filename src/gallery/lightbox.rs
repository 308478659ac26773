//! Zoom overlay over gallery cards.
//!
//! The overlay is created once with its caption settings and keeps its own
//! index of the cards it can open. The gallery calls [`ZoomOverlay::refresh`]
//! after every append so the index never lags behind the displayed cards.

use super::entry::GalleryEntry;
use std::time::{Duration, Instant};

/// Default delay before a caption is displayed.
pub const DEFAULT_CAPTION_DELAY: Duration = Duration::from_millis(250);

/// Collaborator told to re-scan the gallery after new cards are appended.
pub trait ZoomOverlay {
    /// Rebuild the index of openable entries.
    fn refresh(&mut self, entries: &[GalleryEntry]);
}

/// Where caption text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionSource {
    /// The card's alt text.
    #[default]
    Alt,
}

/// Lightbox settings fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxConfig {
    /// Show captions at all
    pub captions: bool,
    /// Where caption text is taken from
    pub caption_source: CaptionSource,
    /// Delay after opening or stepping before the caption appears
    pub caption_delay: Duration,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            captions: true,
            caption_source: CaptionSource::Alt,
            caption_delay: DEFAULT_CAPTION_DELAY,
        }
    }
}

/// An openable item in the lightbox index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxItem {
    /// Full-size image URL
    pub url: String,
    /// Caption text
    pub caption: String,
}

/// Currently opened item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Opened {
    index: usize,
    shown_at: Instant,
}

/// Terminal zoom overlay.
#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    config: LightboxConfig,
    items: Vec<LightboxItem>,
    opened: Option<Opened>,
}

impl Lightbox {
    /// Create an empty lightbox.
    pub fn new(config: LightboxConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            opened: None,
        }
    }

    /// Settings fixed at construction.
    pub fn config(&self) -> &LightboxConfig {
        &self.config
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing can be opened.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Open the item at `index`. Out of range indexes are ignored.
    pub fn open(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.opened = Some(Opened {
            index,
            shown_at: now,
        });
        true
    }

    /// Close the overlay. No-op when closed.
    pub fn close(&mut self) {
        self.opened = None;
    }

    /// True while an item is shown.
    pub fn is_open(&self) -> bool {
        self.opened.is_some()
    }

    /// Index of the opened item.
    pub fn current_index(&self) -> Option<usize> {
        self.opened.map(|o| o.index)
    }

    /// The opened item.
    pub fn current(&self) -> Option<&LightboxItem> {
        self.opened.and_then(|o| self.items.get(o.index))
    }

    /// Step to the next item, wrapping around.
    pub fn next(&mut self, now: Instant) {
        let len = self.items.len();
        if let Some(opened) = self.opened.as_mut() {
            if len > 0 {
                opened.index = (opened.index + 1) % len;
                opened.shown_at = now;
            }
        }
    }

    /// Step to the previous item, wrapping around.
    pub fn prev(&mut self, now: Instant) {
        let len = self.items.len();
        if let Some(opened) = self.opened.as_mut() {
            if len > 0 {
                opened.index = (opened.index + len - 1) % len;
                opened.shown_at = now;
            }
        }
    }

    /// Caption of the opened item, once the caption delay has elapsed.
    pub fn visible_caption(&self, now: Instant) -> Option<&str> {
        if !self.config.captions {
            return None;
        }
        let opened = self.opened?;
        if now.saturating_duration_since(opened.shown_at) < self.config.caption_delay {
            return None;
        }
        self.items
            .get(opened.index)
            .map(|item| item.caption.as_str())
    }
}

impl ZoomOverlay for Lightbox {
    fn refresh(&mut self, entries: &[GalleryEntry]) {
        self.items = entries
            .iter()
            .map(|entry| LightboxItem {
                url: entry.fullsize_url.clone(),
                caption: match self.config.caption_source {
                    CaptionSource::Alt => entry.alt.clone(),
                },
            })
            .collect();

        // A reset gallery takes the opened item with it.
        if let Some(opened) = self.opened {
            if opened.index >= self.items.len() {
                self.opened = None;
            }
        }
    }
}
