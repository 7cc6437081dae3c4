//! Errors raised while loading `lantern.toml`.

use std::path::PathBuf;

use super::error_code::{self, LanternErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid TOML in {}: {message}", path.display())]
    InvalidToml { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

impl LanternErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::CONFIG_NOT_FOUND,
            Self::InvalidToml { .. } => error_code::CONFIG_INVALID_TOML,
            Self::InvalidValue { .. } => error_code::CONFIG_INVALID_VALUE,
            Self::Io(_) => error_code::IO_ERROR,
        }
    }
}
