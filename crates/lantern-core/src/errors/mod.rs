//! Error types for every subsystem, each carrying a stable error code.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;
pub mod fetch_error;
pub mod parse_error;
pub mod project_error;

pub use analysis_error::{AnalysisError, AnalysisResult};
pub use config_error::ConfigError;
pub use fetch_error::FetchError;
pub use parse_error::ParseError;
pub use project_error::ProjectError;
