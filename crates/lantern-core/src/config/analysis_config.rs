//! Analyzer selection and environment override.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// If non-empty, only these analyzer ids run.
    pub only: Vec<String>,
    /// Analyzer ids that never run.
    pub exclude: Vec<String>,
    /// Overrides the `app.env` value read from the project.
    pub environment: Option<String>,
    /// Treat warnings as failures when computing the exit status.
    pub fail_on_warning: bool,
}
