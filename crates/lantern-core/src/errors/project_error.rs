//! Errors raised while opening and reading the inspected Laravel project.

use std::path::PathBuf;

use super::error_code::{self, LanternErrorCode};
use super::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Project directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Not a Laravel application (no artisan file or laravel/framework requirement): {}", path.display())]
    NotLaravel { path: PathBuf },

    #[error("Invalid manifest {}: {message}", path.display())]
    InvalidManifest { path: PathBuf, message: String },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProjectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl LanternErrorCode for ProjectError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::PROJECT_NOT_FOUND,
            Self::NotLaravel { .. } => error_code::PROJECT_NOT_LARAVEL,
            Self::InvalidManifest { .. } => error_code::PROJECT_MANIFEST_INVALID,
            Self::Parse(e) => e.error_code(),
            Self::Io { .. } => error_code::IO_ERROR,
        }
    }
}
