//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod image;
pub mod key_action;
pub mod query;

// Re-export for convenience
pub use error::{AppError, SearchError, SearchFailed};
pub use image::{FetchResult, ImageRecord};
pub use key_action::KeyAction;
pub use query::SearchQuery;
