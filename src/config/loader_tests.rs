//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// Write `contents` to a uniquely named file in the temp dir.
fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("pixgal_test_{}_{name}.toml", std::process::id()));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

fn valid() -> ResolvedConfig {
    ResolvedConfig {
        api_key: Some("abc123".to_string()),
        ..ResolvedConfig::default()
    }
}

// ===== Paths =====

#[test]
fn default_config_path_contains_pixgal_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("pixgal") && path_str.ends_with("config.toml"),
        "Path should contain 'pixgal' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_pixgal_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("pixgal.log"),
        "got: {:?}",
        path
    );
}

// ===== load_config_file =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let path = temp_config(
        "valid",
        r#"
api_key = "abc123"
endpoint = "http://localhost:8080/api/"
page_size = 20
load_more = "auto"
visibility_threshold = 0.75
root_margin = 2
caption_delay_ms = 100
toast_timeout_ms = 5000
log_file_path = "/tmp/pixgal-test.log"
"#,
    );

    let config = load_config_file(&path).unwrap().unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.api_key.as_deref(), Some("abc123"));
    assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8080/api/"));
    assert_eq!(config.page_size, Some(20));
    assert_eq!(config.load_more, Some(LoadMoreMode::Auto));
    assert_eq!(config.visibility_threshold, Some(0.75));
    assert_eq!(config.root_margin, Some(2));
    assert_eq!(config.caption_delay_ms, Some(100));
    assert_eq!(config.toast_timeout_ms, Some(5000));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/pixgal-test.log"))
    );
}

#[test]
fn load_config_file_handles_partial_config() {
    let path = temp_config("partial", "page_size = 12\n# rest omitted\n");
    let config = load_config_file(&path).unwrap().unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.page_size, Some(12));
    assert_eq!(config.api_key, None);
    assert_eq!(config.load_more, None);
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let path = temp_config("invalid", "this is not valid TOML ][}{");
    let result = load_config_file(&path);
    fs::remove_file(&path).ok();

    match result {
        Err(ConfigError::ParseError { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let path = temp_config("unknown", "theme = \"dark\"\n");
    let result = load_config_file(&path);
    fs::remove_file(&path).ok();

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn load_config_file_rejects_unknown_load_more_mode() {
    let path = temp_config("mode", "load_more = \"scroll\"\n");
    let result = load_config_file(&path);
    fs::remove_file(&path).ok();

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn load_config_file_reports_read_error_for_directory() {
    let dir = env::temp_dir().join(format!("pixgal_test_dir_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let result = load_config_file(&dir);
    fs::remove_dir_all(&dir).ok();

    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

// ===== load_config_with_precedence =====

#[test]
#[serial(env)]
fn explicit_path_beats_env_var() {
    let explicit = temp_config("explicit", "page_size = 1\n");
    let from_env = temp_config("from_env", "page_size = 2\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();

    env::remove_var(CONFIG_ENV);
    fs::remove_file(&explicit).ok();
    fs::remove_file(&from_env).ok();
    assert_eq!(config.page_size, Some(1));
}

#[test]
#[serial(env)]
fn env_var_path_is_used_without_explicit_path() {
    let from_env = temp_config("env_only", "page_size = 2\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();

    env::remove_var(CONFIG_ENV);
    fs::remove_file(&from_env).ok();
    assert_eq!(config.page_size, Some(2));
}

#[test]
#[serial(env)]
fn missing_env_var_file_is_not_an_error() {
    env::set_var(CONFIG_ENV, "/nonexistent/pixgal/config.toml");
    let result = load_config_with_precedence(None);
    env::remove_var(CONFIG_ENV);

    assert_eq!(result, Ok(None));
}

// ===== merge_config =====

#[test]
fn merge_without_file_gives_defaults() {
    let resolved = merge_config(None);
    assert_eq!(resolved, ResolvedConfig::default());
    assert_eq!(resolved.page_size, 40);
    assert_eq!(resolved.load_more, LoadMoreMode::Button);
    assert_eq!(resolved.visibility_threshold, 0.5);
    assert_eq!(resolved.caption_delay, Duration::from_millis(250));
    assert_eq!(resolved.toast_timeout, Duration::from_millis(3000));
    assert_eq!(resolved.endpoint, "https://pixabay.com/api/");
    assert_eq!(resolved.api_key, None);
}

#[test]
fn merge_takes_set_fields_and_defaults_the_rest() {
    let file = ConfigFile {
        page_size: Some(10),
        caption_delay_ms: Some(0),
        log_file_path: Some(PathBuf::from("/custom/app.log")),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    assert_eq!(resolved.page_size, 10);
    assert_eq!(resolved.caption_delay, Duration::ZERO);
    assert_eq!(resolved.log_file_path, PathBuf::from("/custom/app.log"));
    assert_eq!(resolved.toast_timeout, DEFAULT_TOAST_TIMEOUT);
}

// ===== apply_env_overrides =====

#[test]
#[serial(env)]
fn env_overrides_key_and_mode() {
    env::set_var(API_KEY_ENV, "from-env");
    env::set_var(LOAD_MORE_ENV, "auto");

    let config = apply_env_overrides(ResolvedConfig::default());

    env::remove_var(API_KEY_ENV);
    env::remove_var(LOAD_MORE_ENV);
    assert_eq!(config.api_key.as_deref(), Some("from-env"));
    assert_eq!(config.load_more, LoadMoreMode::Auto);
}

#[test]
#[serial(env)]
fn env_ignores_blank_key_and_unknown_mode() {
    env::set_var(API_KEY_ENV, "  ");
    env::set_var(LOAD_MORE_ENV, "sideways");

    let base = valid();
    let config = apply_env_overrides(base.clone());

    env::remove_var(API_KEY_ENV);
    env::remove_var(LOAD_MORE_ENV);
    assert_eq!(config, base);
}

// ===== apply_cli_overrides =====

#[test]
fn cli_overrides_win() {
    let base = ResolvedConfig {
        api_key: Some("from-file".to_string()),
        page_size: 10,
        ..ResolvedConfig::default()
    };

    let config = apply_cli_overrides(
        base,
        CliOverrides {
            api_key: Some("from-cli".to_string()),
            page_size: Some(5),
            auto_load: true,
        },
    );

    assert_eq!(config.api_key.as_deref(), Some("from-cli"));
    assert_eq!(config.page_size, 5);
    assert_eq!(config.load_more, LoadMoreMode::Auto);
}

#[test]
fn empty_cli_overrides_change_nothing() {
    let base = ResolvedConfig {
        load_more: LoadMoreMode::Auto,
        ..valid()
    };
    let config = apply_cli_overrides(base.clone(), CliOverrides::default());
    assert_eq!(config, base, "absent --auto-load does not force button mode");
}

// ===== validate =====

#[test]
fn validate_accepts_defaults_with_key() {
    assert_eq!(valid().validate(), Ok(()));
}

#[test]
fn validate_rejects_missing_key() {
    let err = ResolvedConfig::default().validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "api_key", .. }));
}

#[test]
fn validate_rejects_blank_key() {
    let config = ResolvedConfig {
        api_key: Some("   ".to_string()),
        ..ResolvedConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_zero_page_size() {
    let config = ResolvedConfig {
        page_size: 0,
        ..valid()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "page_size", .. }));
}

#[test]
fn validate_checks_threshold_range() {
    for bad in [0.0, -0.1, 1.5, f32::NAN] {
        let config = ResolvedConfig {
            visibility_threshold: bad,
            ..valid()
        };
        assert!(config.validate().is_err(), "{bad} should be rejected");
    }
    let full = ResolvedConfig {
        visibility_threshold: 1.0,
        ..valid()
    };
    assert_eq!(full.validate(), Ok(()));
}

#[test]
fn debug_output_redacts_api_key() {
    let rendered = format!("{:?}", valid());
    assert!(!rendered.contains("abc123"));
    assert!(rendered.contains("<redacted>"));
}
