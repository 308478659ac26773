//! Configuration module.
//!
//! Settings resolve through four layers, lowest first: built-in defaults, the
//! TOML config file, environment variables, command line flags. See
//! [`loader`] for each step and [`ResolvedConfig::validate`] for the checks
//! applied to the result.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig, apply_cli_overrides,
    apply_env_overrides, default_config_path, default_log_path, load_config_with_precedence,
    merge_config,
};

use std::path::PathBuf;

/// Run the whole precedence chain and validate the result.
///
/// # Errors
///
/// Returns [`ConfigError`] if a config file exists but is unreadable or
/// malformed, or if the resolved values fail validation.
pub fn resolve(
    config_path: Option<PathBuf>,
    cli: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_cli_overrides(apply_env_overrides(merge_config(file)), cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::LoadMoreMode;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn resolve_layers_file_then_cli() {
        let path = std::env::temp_dir().join(format!(
            "pixgal_test_{}_resolve.toml",
            std::process::id()
        ));
        std::fs::write(&path, "api_key = \"file-key\"\npage_size = 12\n").unwrap();
        std::env::remove_var(loader::API_KEY_ENV);
        std::env::remove_var(loader::LOAD_MORE_ENV);

        let config = resolve(
            Some(path.clone()),
            CliOverrides {
                page_size: Some(30),
                auto_load: true,
                ..CliOverrides::default()
            },
        )
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.page_size, 30);
        assert_eq!(config.load_more, LoadMoreMode::Auto);
    }

    #[test]
    #[serial(env)]
    fn resolve_fails_validation_without_key() {
        std::env::remove_var(loader::API_KEY_ENV);
        let result = resolve(
            Some(PathBuf::from("/nonexistent/pixgal.toml")),
            CliOverrides::default(),
        );
        assert!(matches!(result, Err(ConfigError::Invalid { field: "api_key", .. })));
    }
}
