//! Config loading: defaults, partial files, validation and resolution order.

use lantern_core::config::{LanternConfig, ReportFormat, CONFIG_FILE_NAME};
use lantern_core::errors::ConfigError;
use lantern_core::LanternErrorCode;

#[test]
fn empty_toml_yields_defaults() {
    let config = LanternConfig::from_toml("").unwrap();
    assert_eq!(config.http.timeout_secs, 10);
    assert_eq!(config.http.uncached_asset_threshold, 5);
    assert_eq!(config.http.max_manifest_depth, 32);
    assert_eq!(config.scan.effective_max_file_size(), 1_048_576);
    assert_eq!(config.report.format, ReportFormat::Text);
    assert_eq!(config.logging.level, "warn");
    assert!(config.analysis.only.is_empty());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = LanternConfig::from_toml(
        r#"
[analysis]
exclude = ["cache-headers"]
environment = "staging"

[http]
base_url = "https://example.test"
uncached_asset_threshold = 2

[report]
format = "json"
"#,
    )
    .unwrap();
    assert_eq!(config.analysis.exclude, vec!["cache-headers".to_string()]);
    assert_eq!(config.analysis.environment.as_deref(), Some("staging"));
    assert_eq!(config.http.base_url.as_deref(), Some("https://example.test"));
    assert_eq!(config.http.uncached_asset_threshold, 2);
    assert_eq!(config.http.timeout_secs, 10);
    assert_eq!(config.report.format, ReportFormat::Json);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(LanternConfig::from_toml("[http]\nretries = 3\n").is_err());
    assert!(LanternConfig::from_toml("[nonsense]\n").is_err());
}

#[test]
fn validation_rejects_zero_threshold_and_bad_url() {
    let mut config = LanternConfig::default();
    config.http.uncached_asset_threshold = 0;
    let err = config.validate().unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_INVALID_VALUE");

    let mut config = LanternConfig::default();
    config.http.base_url = Some("ftp://example.test".to_string());
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn resolve_prefers_explicit_then_project_file_then_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let resolved = LanternConfig::resolve(dir.path(), None).unwrap();
    assert_eq!(resolved.http.timeout_secs, 10);

    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[http]\ntimeout_secs = 3\n",
    )
    .unwrap();
    let resolved = LanternConfig::resolve(dir.path(), None).unwrap();
    assert_eq!(resolved.http.timeout_secs, 3);

    let explicit = dir.path().join("ci.toml");
    std::fs::write(&explicit, "[http]\ntimeout_secs = 7\n").unwrap();
    let resolved = LanternConfig::resolve(dir.path(), Some(&explicit)).unwrap();
    assert_eq!(resolved.http.timeout_secs, 7);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = LanternConfig::resolve(dir.path(), Some(&dir.path().join("missing.toml")))
        .unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_NOT_FOUND");
}

#[test]
fn invalid_toml_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[http\n").unwrap();
    let err = LanternConfig::resolve(dir.path(), None).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_INVALID_TOML");
    assert!(err.to_string().contains("lantern.toml"));
}
