//! Pagination / fetch-state coordinator (pure).
//!
//! [`PaginationController`] owns the search session and decides when to fetch,
//! where results go and when to stop. It never performs I/O itself: every
//! operation that needs a page returns a [`PendingFetch`] describing it, and
//! the caller reports the outcome through [`PaginationController::complete`].
//! That split keeps the terminal event loop live while a request is in flight
//! and lets the controller fence answers that belong to a replaced session.
//!
//! # States
//!
//! ```text
//! Idle ──start──▶ Loading ──ok, more──▶ Ready ──load_more──▶ Loading
//!                    │                    ▲                    │
//!                    │                    └──── err (retry) ───┤
//!                    ├──ok, last page──▶ Exhausted ◀───────────┘ ok, last page
//!                    └──err / no hits──▶ Errored
//! ```

pub mod session;
pub mod trigger;

pub use session::{SessionId, more_pages_remain};
pub use trigger::{
    DEFAULT_VISIBILITY_THRESHOLD, LoadMoreMode, LoadMoreTrigger, RowSpan, VisibilityObserver,
    intersection_ratio,
};

use crate::client::ImageSearchClient;
use crate::gallery::GalleryRenderer;
use crate::model::{FetchResult, SearchError, SearchFailed, SearchQuery};
use crate::notify::Notifier;
use session::SearchSession;
use tracing::{debug, info, warn};

/// Shown when the first page of a search has no hits.
pub const NO_RESULTS_MESSAGE: &str =
    "Sorry, there are no images matching your search query. Please try again.";

/// Shown when a fetch fails.
pub const FETCH_FAILED_MESSAGE: &str =
    "Sorry, there was an error while fetching images. Please try again";

/// Shown when the last page has been rendered.
pub const END_OF_RESULTS_MESSAGE: &str =
    "We're sorry, but you've reached the end of search results.";

/// Why the controller is in [`LoadState::Errored`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The search succeeded but matched nothing.
    NoResults,
    /// The first page could not be fetched.
    SearchFailed,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No search submitted yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Last fetch succeeded and more pages exist.
    Ready,
    /// Every page has been rendered.
    Exhausted,
    /// The search could not produce a first page.
    Errored(FailureKind),
}

impl LoadState {
    /// Short label for status displays.
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Ready => "ready",
            LoadState::Exhausted => "end of results",
            LoadState::Errored(FailureKind::NoResults) => "no results",
            LoadState::Errored(FailureKind::SearchFailed) => "error",
        }
    }
}

/// Which page of a session a fetch is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Page 1 of a new session
    FirstPage,
    /// A load-more page
    NextPage,
}

/// A fetch the controller is waiting on.
///
/// Carries everything the request needs, so the caller never reads controller
/// state after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    session: SessionId,
    query: SearchQuery,
    page: u32,
    per_page: u32,
    kind: FetchKind,
}

impl PendingFetch {
    /// Session the fetch belongs to.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Query to send.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// 1-based page number requested.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size to request.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Whether this starts a session or extends it.
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    /// Issue the request described by this fetch.
    pub async fn run<C: ImageSearchClient>(&self, client: &C) -> Result<FetchResult, SearchFailed> {
        client
            .search(self.query.as_str(), self.page, self.per_page)
            .await
    }
}

/// Outcome of [`PaginationController::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was applied; carries the resulting state.
    Applied(LoadState),
    /// The fetch belonged to a replaced session or was not awaited; ignored.
    Stale,
}

/// Search session coordinator.
///
/// Generic over the gallery and notifier capabilities so it can be driven
/// without any UI.
#[derive(Debug)]
pub struct PaginationController<G, N> {
    page_size: u32,
    next_session: SessionId,
    session: Option<SearchSession>,
    in_flight: Option<PendingFetch>,
    state: LoadState,
    last_error: Option<SearchError>,
    trigger_visible: bool,
    trigger: LoadMoreTrigger,
    gallery: G,
    notifier: N,
}

impl<G: GalleryRenderer, N: Notifier> PaginationController<G, N> {
    /// Create an idle controller.
    ///
    /// A `page_size` of 0 is treated as 1.
    pub fn new(gallery: G, notifier: N, page_size: u32, trigger: LoadMoreTrigger) -> Self {
        Self {
            page_size: page_size.max(1),
            next_session: SessionId::first(),
            session: None,
            in_flight: None,
            state: LoadState::Idle,
            last_error: None,
            trigger_visible: false,
            trigger,
            gallery,
            notifier,
        }
    }

    // ===== Accessors =====

    /// Current state.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// True while a fetch is awaited.
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Records requested per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Query of the current session.
    pub fn query(&self) -> Option<&SearchQuery> {
        self.session.as_ref().map(|s| &s.query)
    }

    /// Last successfully rendered page, 0 before the first page arrives.
    pub fn current_page(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.current_page)
    }

    /// Total reported by the API for the current session.
    pub fn total_available(&self) -> Option<u64> {
        self.session.as_ref().and_then(|s| s.total_available)
    }

    /// Cause of the most recent failure of the current session.
    ///
    /// Cleared by the next successful page or a new search.
    pub fn last_error(&self) -> Option<&SearchError> {
        self.last_error.as_ref()
    }

    /// Whether the load-more control is shown.
    pub fn trigger_visible(&self) -> bool {
        self.trigger_visible
    }

    /// The configured load-more trigger.
    pub fn trigger(&self) -> &LoadMoreTrigger {
        &self.trigger
    }

    /// The fetch currently awaited, if any.
    pub fn in_flight(&self) -> Option<&PendingFetch> {
        self.in_flight.as_ref()
    }

    /// The gallery fed by this controller.
    pub fn gallery(&self) -> &G {
        &self.gallery
    }

    /// Mutable gallery access for scrolling and overlay navigation.
    ///
    /// Entries must only be changed through the controller.
    pub fn gallery_mut(&mut self) -> &mut G {
        &mut self.gallery
    }

    /// The notifier used for user messages.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // ===== Operations =====

    /// Submit a new query.
    ///
    /// Empty or whitespace-only input is ignored. Otherwise the previous
    /// session is replaced, the gallery cleared, the control hidden and the
    /// first page requested. A fetch still in flight for the old session
    /// becomes stale.
    pub fn start_search(&mut self, raw: &str) -> Option<PendingFetch> {
        let Some(query) = SearchQuery::new(raw) else {
            debug!("Ignoring empty search submission");
            return None;
        };

        let id = self.next_session;
        self.next_session = id.next();

        if let Some(stale) = self.in_flight.take() {
            debug!(
                session = stale.session.get(),
                page = stale.page,
                "Replacing session with fetch in flight"
            );
        }

        self.gallery.reset();
        self.last_error = None;
        self.trigger_visible = false;
        self.trigger.unobserve();
        self.session = Some(SearchSession::new(id, query.clone(), self.page_size));

        info!(session = id.get(), query = %query, "Starting search");
        Some(self.begin_fetch(id, query, 1, FetchKind::FirstPage))
    }

    /// Request the next page.
    ///
    /// Only valid while [`LoadState::Ready`] with the control shown; any
    /// other call is a no-op, so repeated activations while loading never
    /// issue a second request.
    pub fn load_more(&mut self) -> Option<PendingFetch> {
        if self.state != LoadState::Ready || !self.trigger_visible {
            debug!(state = ?self.state, "Ignoring load-more request");
            return None;
        }
        let session = self.session.as_ref()?;
        let (id, query, page) = (session.id, session.query.clone(), session.next_page());

        info!(session = id.get(), page, "Loading more results");
        Some(self.begin_fetch(id, query, page, FetchKind::NextPage))
    }

    /// Manual trigger: the load-more control was activated.
    ///
    /// Ignored when the automatic trigger is configured.
    pub fn activate_trigger(&mut self) -> Option<PendingFetch> {
        match self.trigger {
            LoadMoreTrigger::Manual => self.load_more(),
            LoadMoreTrigger::Auto(_) => {
                debug!("Manual activation ignored in auto mode");
                None
            }
        }
    }

    /// Automatic trigger: report how much of the control is visible.
    ///
    /// Samples are only taken while the controller could accept a load, so a
    /// crossing that happens mid-flight is seen again once the page lands.
    pub fn observe_trigger(&mut self, ratio: f32) -> Option<PendingFetch> {
        if self.state != LoadState::Ready || !self.trigger_visible {
            return None;
        }
        let fired = match &mut self.trigger {
            LoadMoreTrigger::Manual => return None,
            LoadMoreTrigger::Auto(observer) => observer.sample(ratio),
        };
        if fired {
            debug!(ratio, "Load-more control became visible");
            self.load_more()
        } else {
            None
        }
    }

    /// Report the outcome of `fetch`.
    ///
    /// Results for anything other than the fetch currently awaited are
    /// dropped without touching the gallery or notifying.
    pub fn complete(
        &mut self,
        fetch: &PendingFetch,
        result: Result<FetchResult, SearchFailed>,
    ) -> Completion {
        if self.in_flight.as_ref() != Some(fetch) {
            debug!(
                session = fetch.session.get(),
                page = fetch.page,
                "Discarding stale fetch result"
            );
            return Completion::Stale;
        }
        self.in_flight = None;

        match (fetch.kind, result) {
            (FetchKind::FirstPage, Ok(page)) => self.apply_first_page(fetch, page),
            (FetchKind::FirstPage, Err(err)) => self.fail_first_page(&err),
            (FetchKind::NextPage, Ok(page)) => self.apply_next_page(fetch, page),
            (FetchKind::NextPage, Err(err)) => self.fail_next_page(&err),
        }

        Completion::Applied(self.state)
    }

    /// Issue `fetch` through `client` and apply the result.
    pub async fn fetch_and_complete<C: ImageSearchClient>(
        &mut self,
        client: &C,
        fetch: PendingFetch,
    ) -> Completion {
        let result = fetch.run(client).await;
        self.complete(&fetch, result)
    }

    // ===== Transitions =====

    fn begin_fetch(
        &mut self,
        session: SessionId,
        query: SearchQuery,
        page: u32,
        kind: FetchKind,
    ) -> PendingFetch {
        let fetch = PendingFetch {
            session,
            query,
            page,
            per_page: self.page_size,
            kind,
        };
        self.in_flight = Some(fetch.clone());
        self.state = LoadState::Loading;
        fetch
    }

    fn apply_first_page(&mut self, fetch: &PendingFetch, page: FetchResult) {
        if page.is_empty() {
            info!(query = %fetch.query, "Search returned no images");
            self.notifier.failure(NO_RESULTS_MESSAGE);
            self.last_error = Some(SearchError::NoResults);
            self.state = LoadState::Errored(FailureKind::NoResults);
            return;
        }

        self.gallery.append(&page.records);
        self.last_error = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.commit(fetch.page, page.total_available);

        if session.has_more() {
            self.trigger_visible = true;
            self.trigger.observe();
            self.state = LoadState::Ready;
        } else {
            self.state = LoadState::Exhausted;
        }
        info!(
            records = page.records.len(),
            total = page.total_available,
            state = ?self.state,
            "First page rendered"
        );
    }

    fn fail_first_page(&mut self, err: &SearchFailed) {
        warn!(cause = %err.cause(), "First page failed");
        self.notifier.failure(FETCH_FAILED_MESSAGE);
        self.last_error = Some(err.cause().clone());
        self.state = LoadState::Errored(FailureKind::SearchFailed);
    }

    fn apply_next_page(&mut self, fetch: &PendingFetch, page: FetchResult) {
        self.gallery.append(&page.records);
        self.last_error = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.commit(fetch.page, page.total_available);

        // An empty page past the first means the API has nothing left even
        // if its total claims otherwise.
        if session.has_more() && !page.is_empty() {
            self.trigger.observe();
            self.state = LoadState::Ready;
        } else {
            self.trigger_visible = false;
            self.trigger.unobserve();
            self.notifier.info(END_OF_RESULTS_MESSAGE);
            self.state = LoadState::Exhausted;
        }
        info!(
            page = fetch.page,
            records = page.records.len(),
            state = ?self.state,
            "Next page rendered"
        );
    }

    fn fail_next_page(&mut self, err: &SearchFailed) {
        warn!(cause = %err.cause(), "Next page failed");
        self.notifier.failure(FETCH_FAILED_MESSAGE);
        self.last_error = Some(err.cause().clone());
        // The observer keeps its edge state: a control that stayed in view
        // must leave and re-enter before it fires again.
        self.state = LoadState::Ready;
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
