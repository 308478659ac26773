//! Configuration file loading with precedence handling.

use crate::client::{DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE};
use crate::gallery::lightbox::DEFAULT_CAPTION_DELAY;
use crate::notify::DEFAULT_TOAST_TIMEOUT;
use crate::pagination::{DEFAULT_VISIBILITY_THRESHOLD, LoadMoreMode};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PIXGAL_CONFIG";

/// Environment variable carrying the API key.
pub const API_KEY_ENV: &str = "PIXGAL_API_KEY";

/// Environment variable selecting the load-more mode.
pub const LOAD_MORE_ENV: &str = "PIXGAL_LOAD_MORE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A resolved value is out of range or missing.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Name of the offending setting.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pixgal/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// API key sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Search endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Records requested per page.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// `"button"` or `"auto"`.
    #[serde(default)]
    pub load_more: Option<LoadMoreMode>,

    /// Fraction of the load-more control that must be visible in auto mode.
    #[serde(default)]
    pub visibility_threshold: Option<f32>,

    /// Extra rows around the viewport counted as visible in auto mode.
    #[serde(default)]
    pub root_margin: Option<usize>,

    /// Delay before the overlay caption appears.
    #[serde(default)]
    pub caption_delay_ms: Option<u64>,

    /// Lifetime of a toast notification.
    #[serde(default)]
    pub toast_timeout_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Clone, PartialEq)]
pub struct ResolvedConfig {
    /// API key; `None` until some layer supplies one.
    pub api_key: Option<String>,
    /// Search API endpoint
    pub endpoint: String,
    /// Records requested per page
    pub page_size: u32,
    /// Which load-more trigger is active
    pub load_more: LoadMoreMode,
    /// Visible fraction of the control that fires the automatic trigger
    pub visibility_threshold: f32,
    /// Rows added to both viewport edges when measuring visibility
    pub root_margin: usize,
    /// Delay before the zoom overlay shows a caption
    pub caption_delay: Duration,
    /// How long a toast stays on screen
    pub toast_timeout: Duration,
    /// Log file location
    pub log_file_path: PathBuf,
}

// Hand-written so the key never lands in a log line.
impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("page_size", &self.page_size)
            .field("load_more", &self.load_more)
            .field("visibility_threshold", &self.visibility_threshold)
            .field("root_margin", &self.root_margin)
            .field("caption_delay", &self.caption_delay)
            .field("toast_timeout", &self.toast_timeout)
            .field("log_file_path", &self.log_file_path)
            .finish()
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            load_more: LoadMoreMode::Button,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            root_margin: 0,
            caption_delay: DEFAULT_CAPTION_DELAY,
            toast_timeout: DEFAULT_TOAST_TIMEOUT,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Check the values no layer is allowed to get wrong.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero page size, a visibility
    /// threshold outside `(0, 1]`, or a missing/blank API key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.visibility_threshold > 0.0 && self.visibility_threshold <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "visibility_threshold",
                reason: format!("{} is outside (0, 1]", self.visibility_threshold),
            });
        }
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(()),
            _ => Err(ConfigError::Invalid {
                field: "api_key",
                reason: format!("set it in the config file, {API_KEY_ENV} or --api-key"),
            }),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pixgal/pixgal.log` on Linux, the platform state or
/// data directory elsewhere, and `pixgal.log` in the working directory if
/// neither can be determined.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("pixgal").join("pixgal.log"))
        .unwrap_or_else(|| PathBuf::from("pixgal.log"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/pixgal/config.toml` on Linux, the platform config
/// directory elsewhere, `None` if it cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pixgal").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PIXGAL_CONFIG` environment variable
/// 3. Default path `~/.config/pixgal/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        api_key: config.api_key.or(defaults.api_key),
        endpoint: config.endpoint.unwrap_or(defaults.endpoint),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        load_more: config.load_more.unwrap_or(defaults.load_more),
        visibility_threshold: config
            .visibility_threshold
            .unwrap_or(defaults.visibility_threshold),
        root_margin: config.root_margin.unwrap_or(defaults.root_margin),
        caption_delay: config
            .caption_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.caption_delay),
        toast_timeout: config
            .toast_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.toast_timeout),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PIXGAL_API_KEY`: API key
/// - `PIXGAL_LOAD_MORE`: `button` or `auto` (unrecognized values are ignored)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.api_key = Some(key);
        }
    }

    if let Ok(mode) = std::env::var(LOAD_MORE_ENV) {
        match LoadMoreMode::parse(&mode) {
            Some(mode) => config.load_more = mode,
            None => tracing::warn!(value = %mode, "Ignoring unknown {LOAD_MORE_ENV}"),
        }
    }

    config
}

/// Overrides taken from command line flags.
///
/// `None` (or `false` for switches) leaves the lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--api-key`
    pub api_key: Option<String>,
    /// `--page-size`
    pub page_size: Option<u32>,
    /// `--auto-load`
    pub auto_load: bool,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }

    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    if cli.auto_load {
        config.load_more = LoadMoreMode::Auto;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
