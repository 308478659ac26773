//! pixgal
//!
//! Terminal image search gallery with incremental "load more" pagination.
//!
//! Pure core / impure shell:
//! - [`model`], [`pagination`], [`gallery`], [`notify`] and [`config`] hold the
//!   logic and never touch the network or the terminal.
//! - [`client`] talks HTTP, [`view`] owns the terminal, [`logging`] the log file.

pub mod client;
pub mod config;
pub mod gallery;
pub mod logging;
pub mod model;
pub mod notify;
pub mod pagination;
pub mod view;
