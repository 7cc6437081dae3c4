//! HTTP errors raised while probing compiled assets.

use super::error_code::{self, LanternErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid asset URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("HTTP client could not be built: {message}")]
    Client { message: String },
}

impl LanternErrorCode for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => error_code::FETCH_INVALID_URL,
            Self::Request { .. } | Self::Client { .. } => error_code::FETCH_FAILED,
        }
    }
}
