//! Everything an analyzer may look at during one run.

use std::sync::OnceLock;

use lantern_core::errors::{AnalysisResult, ParseError};
use lantern_core::{AppEnvironment, LanternConfig};

use crate::assets::AssetFetcher;
use crate::project::LaravelProject;
use crate::scanner::SourceIndex;

pub struct AnalysisContext<'a> {
    pub project: &'a LaravelProject,
    pub config: &'a LanternConfig,
    pub fetcher: &'a dyn AssetFetcher,
    environment: AppEnvironment,
    sources: OnceLock<Result<SourceIndex, ParseError>>,
}

impl<'a> AnalysisContext<'a> {
    /// The environment is `[analysis] environment` when set, otherwise the
    /// project's own `app.env`.
    pub fn new(
        project: &'a LaravelProject,
        config: &'a LanternConfig,
        fetcher: &'a dyn AssetFetcher,
    ) -> Self {
        let environment = config
            .analysis
            .environment
            .as_deref()
            .map(AppEnvironment::parse_str)
            .unwrap_or_else(|| project.environment().clone());
        Self {
            project,
            config,
            fetcher,
            environment,
            sources: OnceLock::new(),
        }
    }

    /// Use a prebuilt source index instead of walking the project.
    pub fn with_sources(self, index: SourceIndex) -> Self {
        let _ = self.sources.set(Ok(index));
        self
    }

    pub fn environment(&self) -> &AppEnvironment {
        &self.environment
    }

    /// Parsed application sources, built on first use and shared by every
    /// source-level analyzer of the run.
    pub fn sources(&self) -> AnalysisResult<&SourceIndex> {
        let built = self.sources.get_or_init(|| {
            let _span = tracing::debug_span!("source_index").entered();
            SourceIndex::build(self.project.base_path(), &self.config.scan)
        });
        match built {
            Ok(index) => Ok(index),
            Err(e) => Err(e.clone().into()),
        }
    }

    /// Base URL for asset probes: `[http] base_url`, else `app.url`.
    pub fn base_url(&self) -> Option<&str> {
        self.config
            .http
            .base_url
            .as_deref()
            .or_else(|| self.project.config().get_str("app.url"))
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Driver of the default cache store, e.g. `redis`.
    pub fn default_cache_driver(&self) -> Option<&str> {
        let config = self.project.config();
        let store = config.get_str("cache.default")?;
        config.get_str(&format!("cache.stores.{store}.driver"))
    }
}
