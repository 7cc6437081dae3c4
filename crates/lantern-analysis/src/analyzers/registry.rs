//! AnalyzerRegistry: register, enable/disable, select by id.

use lantern_core::config::AnalysisConfig;
use lantern_core::FxHashSet;

use super::traits::Analyzer;

/// Registry of all analyzers, in run order, with enable/disable.
pub struct AnalyzerRegistry {
    analyzers: Vec<Box<dyn Analyzer>>,
    disabled: FxHashSet<String>,
}

impl AnalyzerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
            disabled: FxHashSet::default(),
        }
    }

    /// Register an analyzer. Registration order is run order.
    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        self.analyzers.push(analyzer);
    }

    /// Disable a specific analyzer by ID.
    pub fn disable(&mut self, id: &str) {
        self.disabled.insert(id.to_string());
    }

    /// Enable a previously disabled analyzer.
    pub fn enable(&mut self, id: &str) {
        self.disabled.remove(id);
    }

    /// Disable every analyzer whose id is not listed. An empty list keeps
    /// the current selection.
    pub fn retain_only<S: AsRef<str>>(&mut self, ids: &[S]) {
        if ids.is_empty() {
            return;
        }
        for analyzer in &self.analyzers {
            if !ids.iter().any(|id| id.as_ref() == analyzer.id()) {
                self.disabled.insert(analyzer.id().to_string());
            }
        }
    }

    /// Apply `[analysis] only` then `[analysis] exclude`.
    pub fn apply_selection(&mut self, config: &AnalysisConfig) {
        self.retain_only(&config.only);
        for id in &config.exclude {
            self.disable(id);
        }
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        !self.disabled.contains(id)
    }

    /// Ids that are neither registered nor known, for selection warnings.
    pub fn unknown_ids<'s, S: AsRef<str>>(&self, ids: &'s [S]) -> Vec<&'s str> {
        ids.iter()
            .map(AsRef::as_ref)
            .filter(|id| !self.analyzers.iter().any(|a| a.id() == *id))
            .collect()
    }

    /// Total number of registered analyzers.
    pub fn count(&self) -> usize {
        self.analyzers.len()
    }

    /// Number of enabled analyzers.
    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.analyzers.iter().map(|a| a.id()).collect()
    }

    pub fn all(&self) -> impl Iterator<Item = &dyn Analyzer> {
        self.analyzers.iter().map(|a| a.as_ref())
    }

    pub fn enabled(&self) -> impl Iterator<Item = &dyn Analyzer> {
        self.all().filter(move |a| self.is_enabled(a.id()))
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry with every built-in analyzer in a stable order.
pub fn create_default_registry() -> AnalyzerRegistry {
    let mut registry = AnalyzerRegistry::new();

    // Framework caches
    registry.register(Box::new(super::caching::ConfigCachingAnalyzer));
    registry.register(Box::new(super::caching::RouteCachingAnalyzer));
    registry.register(Box::new(super::caching::ViewCachingAnalyzer));

    // Drivers
    registry.register(Box::new(super::drivers::CacheDriverAnalyzer));
    registry.register(Box::new(super::drivers::SessionDriverAnalyzer));
    registry.register(Box::new(super::drivers::QueueDriverAnalyzer));
    registry.register(Box::new(super::drivers::LogLevelAnalyzer));

    // Composer
    registry.register(Box::new(super::composer::AutoloaderOptimizationAnalyzer));
    registry.register(Box::new(super::composer::DevDependenciesAnalyzer));

    registry.register(Box::new(super::middleware::UnusedGlobalMiddlewareAnalyzer));

    // Source scans
    registry.register(Box::new(super::cache_lock::SharedCacheLockAnalyzer));
    registry.register(Box::new(super::env_call::EnvCallAnalyzer));
    registry.register(Box::new(super::collection_call::CollectionCallAnalyzer));

    registry.register(Box::new(super::cache_headers::CacheHeadersAnalyzer));

    registry
}
