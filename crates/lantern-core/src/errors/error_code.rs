//! Stable, machine-readable error codes surfaced in JSON reports.

/// Implemented by every error enum in the workspace.
pub trait LanternErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_NOT_FOUND: &str = "CONFIG_NOT_FOUND";
pub const CONFIG_INVALID_TOML: &str = "CONFIG_INVALID_TOML";
pub const CONFIG_INVALID_VALUE: &str = "CONFIG_INVALID_VALUE";
pub const PROJECT_NOT_FOUND: &str = "PROJECT_NOT_FOUND";
pub const PROJECT_NOT_LARAVEL: &str = "PROJECT_NOT_LARAVEL";
pub const PROJECT_MANIFEST_INVALID: &str = "PROJECT_MANIFEST_INVALID";
pub const PARSE_FAILED: &str = "PARSE_FAILED";
pub const PARSER_UNAVAILABLE: &str = "PARSER_UNAVAILABLE";
pub const FETCH_FAILED: &str = "FETCH_FAILED";
pub const FETCH_INVALID_URL: &str = "FETCH_INVALID_URL";
pub const ANALYZER_FAILED: &str = "ANALYZER_FAILED";
pub const ANALYZER_PANICKED: &str = "ANALYZER_PANICKED";
pub const IO_ERROR: &str = "IO_ERROR";
