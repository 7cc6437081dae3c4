//! AnalysisEngine: evaluates every enabled analyzer with panic isolation.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use lantern_core::errors::{AnalysisError, FetchError};
use lantern_core::{LanternConfig, LanternErrorCode, Status};

use super::types::{AnalyzerRun, Report};
use crate::analyzers::{AnalysisContext, Analyzer, AnalyzerRegistry};
use crate::assets::{AssetFetcher, HttpAssetFetcher};
use crate::project::LaravelProject;
use crate::scanner::SourceIndex;

pub struct AnalysisEngine {
    registry: AnalyzerRegistry,
    config: LanternConfig,
    fetcher: Box<dyn AssetFetcher>,
}

impl AnalysisEngine {
    /// Engine with the HTTP fetcher built from `[http]`. The `[analysis]`
    /// selection is applied to the registry.
    pub fn new(registry: AnalyzerRegistry, config: LanternConfig) -> Result<Self, FetchError> {
        let fetcher = HttpAssetFetcher::new(&config.http)?;
        Ok(Self::with_fetcher(registry, config, Box::new(fetcher)))
    }

    pub fn with_fetcher(
        mut registry: AnalyzerRegistry,
        config: LanternConfig,
        fetcher: Box<dyn AssetFetcher>,
    ) -> Self {
        for id in registry.unknown_ids(&config.analysis.only) {
            tracing::warn!(id, "unknown analyzer id in `only` selection");
        }
        for id in registry.unknown_ids(&config.analysis.exclude) {
            tracing::warn!(id, "unknown analyzer id in `exclude` selection");
        }
        registry.apply_selection(&config.analysis);
        Self {
            registry,
            config,
            fetcher,
        }
    }

    pub fn registry(&self) -> &AnalyzerRegistry {
        &self.registry
    }

    pub fn config(&self) -> &LanternConfig {
        &self.config
    }

    pub fn run(&self, project: &LaravelProject) -> Report {
        let ctx = AnalysisContext::new(project, &self.config, self.fetcher.as_ref());
        self.run_with_context(&ctx)
    }

    /// Run against a prebuilt source index instead of walking the project.
    pub fn run_with_sources(&self, project: &LaravelProject, sources: SourceIndex) -> Report {
        let ctx = AnalysisContext::new(project, &self.config, self.fetcher.as_ref())
            .with_sources(sources);
        self.run_with_context(&ctx)
    }

    fn run_with_context(&self, ctx: &AnalysisContext) -> Report {
        let start = Instant::now();
        let runs: Vec<AnalyzerRun> = self
            .registry
            .enabled()
            .map(|analyzer| run_one(analyzer, ctx))
            .collect();
        let report = Report::new(
            ctx.project.base_path().to_path_buf(),
            ctx.environment().clone(),
            runs,
        );
        tracing::info!(
            analyzers = report.runs.len(),
            failed = report.summary.failed,
            warning = report.summary.warning,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "analysis complete"
        );
        report
    }
}

fn run_one(analyzer: &dyn Analyzer, ctx: &AnalysisContext) -> AnalyzerRun {
    let _span = tracing::info_span!("analyzer", id = analyzer.id()).entered();
    let start = Instant::now();

    let mut run = AnalyzerRun {
        id: analyzer.id().to_string(),
        title: analyzer.title().to_string(),
        severity: analyzer.severity(),
        time_to_fix: analyzer.time_to_fix(),
        status: Status::NotApplicable,
        message: None,
        issues: Vec::new(),
        error_code: None,
        duration_ms: 0,
    };

    let result = catch_unwind(AssertUnwindSafe(|| {
        if analyzer.should_run(ctx) {
            Some(analyzer.analyze(ctx))
        } else {
            None
        }
    }));

    match result {
        Ok(None) => {
            tracing::debug!("not applicable");
        }
        Ok(Some(Ok(outcome))) => {
            tracing::debug!(status = outcome.status.name(), issues = outcome.issues.len(), "finished");
            run.status = outcome.status;
            run.message = Some(outcome.message);
            run.issues = outcome.issues;
        }
        Ok(Some(Err(e))) => {
            tracing::warn!(error = %e, code = e.error_code(), "analyzer failed");
            run.status = Status::Errored;
            run.message = Some(e.to_string());
            run.error_code = Some(e.error_code().to_string());
        }
        Err(_) => {
            let e = AnalysisError::Panicked {
                id: analyzer.id().to_string(),
            };
            tracing::error!(analyzer_id = analyzer.id(), "analyzer panicked");
            run.status = Status::Errored;
            run.message = Some(e.to_string());
            run.error_code = Some(e.error_code().to_string());
        }
    }

    run.duration_ms = start.elapsed().as_millis() as u64;
    run
}
