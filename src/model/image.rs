//! Image records as returned by the image search API.
//!
//! Field names follow the wire format (`camelCase`), everything else about
//! the payload is ignored.

use serde::Deserialize;

/// One image hit from the search API.
///
/// Immutable and rendered verbatim: nothing in the crate rewrites URLs or
/// counters after deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRecord {
    /// API-side identifier. Only used for diagnostics, never for dedup.
    #[serde(default)]
    pub id: Option<u64>,

    /// Small preview image shown in the gallery card.
    #[serde(rename = "webformatURL")]
    pub preview_url: String,

    /// Full size image opened by the zoom overlay.
    #[serde(rename = "largeImageURL")]
    pub fullsize_url: String,

    /// Comma separated tags, doubles as alt text and overlay caption.
    #[serde(default)]
    pub tags: String,

    /// Like count
    #[serde(default)]
    pub likes: u64,
    /// View count
    #[serde(default)]
    pub views: u64,
    /// Comment count
    #[serde(default)]
    pub comments: u64,
    /// Download count
    #[serde(default)]
    pub downloads: u64,
}

/// One page of search results.
///
/// Transient: consumed by the render step and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchResult {
    /// Records on this page, in API order.
    #[serde(rename = "hits")]
    pub records: Vec<ImageRecord>,

    /// Total number of hits the API is willing to serve for the query.
    #[serde(rename = "totalHits")]
    pub total_available: u64,
}

impl FetchResult {
    /// Check whether the page carried no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
