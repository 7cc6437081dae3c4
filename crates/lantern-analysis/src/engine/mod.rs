//! Runs the registry against a project and collects the report.

pub mod runner;
pub mod types;

pub use runner::AnalysisEngine;
pub use types::{AnalyzerRun, Report, Summary};
