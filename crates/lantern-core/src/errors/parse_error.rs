//! PHP parsing errors.

use std::path::PathBuf;

use super::error_code::{self, LanternErrorCode};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to load the PHP grammar: {message}")]
    GrammarUnavailable { message: String },

    #[error("Failed to parse {}", path.display())]
    ParseFailed { path: PathBuf },

    #[error("{} does not return a value", path.display())]
    NoReturnValue { path: PathBuf },
}

impl LanternErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::GrammarUnavailable { .. } => error_code::PARSER_UNAVAILABLE,
            Self::ParseFailed { .. } | Self::NoReturnValue { .. } => error_code::PARSE_FAILED,
        }
    }
}
