//! # lantern-analysis
//!
//! Analysis engine for the Lantern Laravel performance suite.
//! Contains the project model, the PHP source scanner, asset manifest
//! probing, the analyzers, the runner and the report renderers.

#![allow(clippy::module_inception)]

pub mod analyzers;
pub mod assets;
pub mod engine;
pub mod php;
pub mod project;
pub mod report;
pub mod scanner;

pub use analyzers::registry::{create_default_registry, AnalyzerRegistry};
pub use engine::runner::AnalysisEngine;
pub use engine::types::Report;
pub use project::LaravelProject;
