//! Layered configuration: defaults, then `lantern.toml`, then CLI overrides.

pub mod analysis_config;
pub mod http_config;
pub mod logging_config;
pub mod report_config;
pub mod scan_config;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use analysis_config::AnalysisConfig;
pub use http_config::HttpConfig;
pub use logging_config::LoggingConfig;
pub use report_config::{ReportConfig, ReportFormat};
pub use scan_config::ScanConfig;

/// File name looked up in the project root when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "lantern.toml";

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct LanternConfig {
    pub analysis: AnalysisConfig,
    pub scan: ScanConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub report: ReportConfig,
}

impl LanternConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load from an explicit file, which must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&raw).map_err(|e| ConfigError::InvalidToml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a project.
    ///
    /// An explicit path wins; otherwise `<project_root>/lantern.toml` is used
    /// when present; otherwise defaults.
    pub fn resolve(project_root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidate: PathBuf = project_root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading project config");
            return Self::from_file(&candidate);
        }
        Ok(Self::default())
    }

    /// Reject values that deserialize but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "http.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.http.uncached_asset_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                key: "http.uncached_asset_threshold".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if let Some(url) = &self.http.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    key: "http.base_url".to_string(),
                    message: format!("'{url}' is not an http(s) URL"),
                });
            }
        }
        Ok(())
    }
}
