//! Analyzers: one performance check each, plus the shared context and
//! registry they run through.

pub mod cache_headers;
pub mod cache_lock;
pub mod caching;
pub mod collection_call;
pub mod composer;
pub mod context;
pub mod drivers;
pub mod env_call;
pub mod middleware;
pub mod registry;
pub mod traits;

pub use context::AnalysisContext;
pub use registry::{create_default_registry, AnalyzerRegistry};
pub use traits::{Analyzer, Outcome};
