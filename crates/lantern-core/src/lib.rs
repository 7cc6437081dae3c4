//! # lantern-core
//!
//! Foundation crate for the Lantern analyzer suite.
//! Defines the shared result types, errors, config and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::LanternConfig;
pub use errors::error_code::LanternErrorCode;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::environment::AppEnvironment;
pub use types::issue::{Issue, Severity, Status};
