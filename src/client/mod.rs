//! Image search API client (impure shell).
//!
//! [`ImageSearchClient`] is the seam the pagination controller talks to.
//! [`PixabayClient`] is the HTTP implementation. Response classification is a
//! pure function so every failure path is testable without a network.

use crate::model::{FetchResult, SearchError, SearchFailed};
use crate::notify::Notifier;
use reqwest::{StatusCode, Url};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 40;

const USER_AGENT: &str = concat!("pixgal/", env!("CARGO_PKG_VERSION"));

/// Fixed filtering options sent with every request.
const FIXED_PARAMS: [(&str, &str); 3] = [
    ("image_type", "photo"),
    ("orientation", "horizontal"),
    ("safesearch", "true"),
];

/// Source of search result pages.
///
/// Single attempt, no retry. All failures resolve through the returned
/// future as [`SearchFailed`].
pub trait ImageSearchClient: Send + Sync {
    /// Fetch one page of results for `query`.
    ///
    /// `query` is non-empty and trimmed, `page` and `per_page` are at least 1.
    fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<FetchResult, SearchFailed>> + Send;
}

impl<C: ImageSearchClient> ImageSearchClient for Arc<C> {
    fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<FetchResult, SearchFailed>> + Send {
        (**self).search(query, page, per_page)
    }
}

/// Errors constructing a client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured endpoint is not a valid URL.
    #[error("Invalid API endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// The endpoint string that failed to parse.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be built (TLS backend initialization).
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

/// HTTP client for the Pixabay image search API.
pub struct PixabayClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for PixabayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixabayClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl PixabayClient {
    /// Create a client for `endpoint` authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the endpoint does not parse or the HTTP
    /// client cannot be built.
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Self::with_http(http, endpoint, api_key, notifier)
    }

    /// Create a client on top of an already configured `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the endpoint does not parse.
    pub fn with_http(
        http: reqwest::Client,
        endpoint: &str,
        api_key: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            endpoint,
            api_key: api_key.into(),
            notifier,
        })
    }

    /// Build the request URL for one page.
    ///
    /// The query is URL-encoded; the fixed filters are always present.
    pub fn search_url(&self, query: &str, page: u32, per_page: u32) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            pairs.append_pair("q", query);
            for (name, value) in FIXED_PARAMS {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("per_page", &per_page.to_string());
        }
        url
    }

    async fn fetch_page(&self, url: Url) -> Result<FetchResult, SearchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            self.notifier
                .warning("Too many requests. Please try again later.");
        }
        if !status.is_success() {
            return classify_response(status, &[]);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(e.without_url().to_string()))?;

        classify_response(status, &body)
    }
}

impl ImageSearchClient for PixabayClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<FetchResult, SearchFailed> {
        self.notifier
            .info(&format!("Fetching images for \"{query}\"..."));
        info!(query, page, per_page, "Fetching image page");

        let url = self.search_url(query, page, per_page);
        match self.fetch_page(url).await {
            Ok(result) => {
                self.notifier.success(&format!(
                    "Hooray! We found {} images.",
                    result.total_available
                ));
                debug!(
                    records = result.records.len(),
                    total = result.total_available,
                    "Image page fetched"
                );
                Ok(result)
            }
            Err(cause) => {
                warn!(query, page, error = %cause, "Image search failed");
                Err(SearchFailed::new(cause))
            }
        }
    }
}

/// Classify a response by status and body.
///
/// 429 is rate limiting, any other non-success status is a generic failure,
/// and a success body must parse as a result page.
pub fn classify_response(status: StatusCode, body: &[u8]) -> Result<FetchResult, SearchError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(SearchError::RateLimited);
    }
    if !status.is_success() {
        return Err(SearchError::RequestFailed {
            status: status.as_u16(),
        });
    }
    serde_json::from_slice(body).map_err(|e| SearchError::ParseError(e.to_string()))
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
