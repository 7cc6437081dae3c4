//! Errors returned by analyzers. Subsystem errors convert into this via `From`.

use super::error_code::{self, LanternErrorCode};
use super::{FetchError, ParseError, ProjectError};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("project error: {0}")]
    Project(#[from] ProjectError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("analyzer {id} failed: {message}")]
    Failed { id: String, message: String },

    #[error("analyzer {id} panicked")]
    Panicked { id: String },
}

impl LanternErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Project(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Fetch(e) => e.error_code(),
            Self::Failed { .. } => error_code::ANALYZER_FAILED,
            Self::Panicked { .. } => error_code::ANALYZER_PANICKED,
        }
    }
}

/// Convenience type alias.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
