//! Search session bookkeeping.

use crate::model::SearchQuery;

/// Monotonic identifier of a search session.
///
/// Every `start_search` mints a new one; in-flight fetches carry the id they
/// were issued for so late answers from a replaced session can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn first() -> Self {
        Self(1)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw id, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// State of one submitted query, owned by the controller.
///
/// `current_page` is the last page that was successfully rendered; `0` means
/// the first page has not arrived yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchSession {
    pub(crate) id: SessionId,
    pub(crate) query: SearchQuery,
    pub(crate) current_page: u32,
    pub(crate) page_size: u32,
    pub(crate) total_available: Option<u64>,
}

impl SearchSession {
    pub(crate) fn new(id: SessionId, query: SearchQuery, page_size: u32) -> Self {
        Self {
            id,
            query,
            current_page: 0,
            page_size,
            total_available: None,
        }
    }

    /// Page the next fetch should request.
    pub(crate) fn next_page(&self) -> u32 {
        self.current_page.saturating_add(1)
    }

    /// Commit a successfully rendered page.
    pub(crate) fn commit(&mut self, page: u32, total_available: u64) {
        self.current_page = page;
        self.total_available = Some(total_available);
    }

    /// Whether more pages exist after the committed one.
    ///
    /// Unknown totals (nothing fetched yet) count as "more".
    pub(crate) fn has_more(&self) -> bool {
        match self.total_available {
            Some(total) => more_pages_remain(total, self.current_page, self.page_size),
            None => true,
        }
    }
}

/// Whether pages remain after `page` given the API's reported `total`.
///
/// `total > page * page_size`; an exact multiple means exhausted.
pub fn more_pages_remain(total: u64, page: u32, page_size: u32) -> bool {
    let shown = u64::from(page).saturating_mul(u64::from(page_size));
    total > shown
}
