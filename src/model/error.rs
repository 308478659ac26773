//! Error types for pixgal.
//!
//! Search failures are classified once, at the HTTP boundary, into
//! [`SearchError`] and then travel to the pagination controller wrapped in the
//! single normalized [`SearchFailed`] type. None of them is fatal: the
//! controller turns each one into a notification and the user can retry.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level binary error (configuration, logging, terminal UI)
//! - [`SearchFailed`] - What the client hands to the controller
//!   - [`SearchError`] - The classified cause

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error for the binary entry point.
///
/// Only startup and terminal failures end up here. Search failures never
/// reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal setup, rendering or client construction failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),
}

/// Classified cause of a failed search request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The API answered 429 Too Many Requests.
    #[error("Too many requests")]
    RateLimited,

    /// The API answered with any other non-success status.
    #[error("Request failed with HTTP status {status}")]
    RequestFailed {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not a well-formed result page.
    #[error("Malformed response body: {0}")]
    ParseError(String),

    /// The request succeeded but matched nothing.
    ///
    /// Not produced by the client; the controller uses it to tell an empty
    /// result set apart from a transport failure.
    #[error("No images found")]
    NoResults,
}

/// Normalized search failure handed to the pagination controller.
///
/// The display text is generic; the classified cause is
/// available through [`SearchFailed::cause`] and the error source chain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("An error occurred while fetching the data.")]
pub struct SearchFailed {
    #[source]
    cause: SearchError,
}

impl SearchFailed {
    /// Wrap a classified cause.
    pub fn new(cause: SearchError) -> Self {
        Self { cause }
    }

    /// The classified cause.
    pub fn cause(&self) -> &SearchError {
        &self.cause
    }

    /// Whether the failure was caused by rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.cause, SearchError::RateLimited)
    }
}

impl From<SearchError> for SearchFailed {
    fn from(cause: SearchError) -> Self {
        Self::new(cause)
    }
}
