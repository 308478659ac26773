//! Tracing subscriber initialization.
//!
//! The terminal belongs to the UI, so logs go to a file instead.
//! Follow them with `tail -f` in a separate terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Log path has no usable file name
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`, defaults to `info`. Creates the log directory if it
/// doesn't exist. A bare file name logs into the working directory.
///
/// # Errors
///
/// Returns [`LoggingError`] if the directory cannot be created, the path has
/// no file name, or a subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    fn test_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pixgal_test_logs_{}_{name}", std::process::id()))
    }

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_if_missing() {
        let dir = test_dir("create").join("nested");
        let _ = fs::remove_dir_all(&dir);

        // May fail with SubscriberAlreadySet; the directory is created first.
        let _ = init(&dir.join("pixgal.log"));

        assert!(dir.exists(), "Log directory should be created: {:?}", dir);
        let _ = fs::remove_dir_all(test_dir("create"));
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let dir = test_dir("twice");
        let log_file = dir.join("pixgal.log");

        let _ = init(&log_file);
        let second = init(&log_file);

        assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        let result = init(Path::new("/"));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }
}
