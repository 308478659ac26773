//! Rendered form of an image record.

use crate::model::ImageRecord;

/// Number of rows one card occupies in the gallery pane, separator included.
pub const CARD_HEIGHT: u16 = 4;

/// A gallery card built from an [`ImageRecord`].
///
/// Holds exactly the data the card shows; nothing is derived lazily at draw
/// time except truncation to the pane width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    /// Image shown on the card
    pub preview_url: String,
    /// Image opened in the zoom overlay
    pub fullsize_url: String,
    /// Alt text of the card, also used as the overlay caption.
    pub alt: String,
    /// Like count
    pub likes: u64,
    /// View count
    pub views: u64,
    /// Comment count
    pub comments: u64,
    /// Download count
    pub downloads: u64,
}

impl GalleryEntry {
    /// Counter line shown under the caption.
    pub fn info_line(&self) -> String {
        format!(
            "Likes: {}  Views: {}  Comments: {}  Downloads: {}",
            self.likes, self.views, self.comments, self.downloads
        )
    }
}

impl From<&ImageRecord> for GalleryEntry {
    fn from(record: &ImageRecord) -> Self {
        Self {
            preview_url: record.preview_url.clone(),
            fullsize_url: record.fullsize_url.clone(),
            alt: record.tags.clone(),
            likes: record.likes,
            views: record.views,
            comments: record.comments,
            downloads: record.downloads,
        }
    }
}
