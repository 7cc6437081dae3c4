//! Throw-away Laravel applications for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use lantern_analysis::assets::{AssetFetcher, AssetResponse};
use lantern_analysis::engine::types::AnalyzerRun;
use lantern_analysis::{create_default_registry, AnalysisEngine, LaravelProject, Report};
use lantern_core::errors::FetchError;
use lantern_core::LanternConfig;
use tempfile::TempDir;

pub const APP_CONFIG: &str = r#"<?php

return [
    'name' => env('APP_NAME', 'Laravel'),
    'env' => env('APP_ENV', 'production'),
    'debug' => (bool) env('APP_DEBUG', false),
    'url' => env('APP_URL', 'http://localhost'),
    'asset_url' => env('ASSET_URL'),
];
"#;

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// A minimal application: `artisan` and `config/app.php`.
    pub fn laravel() -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fixture
            .write("artisan", "#!/usr/bin/env php\n<?php\n")
            .write("config/app.php", APP_CONFIG);
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
        self
    }

    pub fn env(&self, contents: &str) -> &Self {
        self.write(".env", contents)
    }

    pub fn open(&self) -> LaravelProject {
        LaravelProject::open(self.root()).unwrap()
    }

    pub fn run(&self, config: LanternConfig) -> Report {
        self.run_with(config, Box::new(OfflineFetcher))
    }

    pub fn run_with(&self, config: LanternConfig, fetcher: Box<dyn AssetFetcher>) -> Report {
        let engine = AnalysisEngine::with_fetcher(create_default_registry(), config, fetcher);
        engine.run(&self.open())
    }

    /// Run a single analyzer with default configuration.
    pub fn run_one(&self, id: &str) -> AnalyzerRun {
        self.run_one_with(id, LanternConfig::default())
    }

    pub fn run_one_with(&self, id: &str, mut config: LanternConfig) -> AnalyzerRun {
        config.analysis.only = vec![id.to_string()];
        let report = self.run(config);
        report.run(id).cloned().unwrap()
    }
}

/// Config that pins the environment.
pub fn config_for(environment: &str) -> LanternConfig {
    let mut config = LanternConfig::default();
    config.analysis.environment = Some(environment.to_string());
    config
}

/// A cache config whose default store uses `driver`.
pub fn cache_config(driver: &str) -> String {
    format!(
        r#"<?php
return [
    'default' => 'primary',
    'stores' => [
        'primary' => ['driver' => '{driver}', 'connection' => 'cache'],
    ],
];
"#
    )
}

/// Fetcher that fails every request.
pub struct OfflineFetcher;

impl AssetFetcher for OfflineFetcher {
    fn fetch_headers(&self, url: &str) -> Result<AssetResponse, FetchError> {
        Err(FetchError::Request {
            url: url.to_string(),
            message: "offline".to_string(),
        })
    }
}

/// Fetcher answering every URL with the same header and recording requests.
pub struct StaticFetcher {
    cache_control: Option<String>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl StaticFetcher {
    pub fn new(cache_control: Option<&str>) -> Self {
        Self {
            cache_control: cache_control.map(str::to_string),
            requested: Arc::default(),
        }
    }

    /// Handle on the requested URLs that outlives the fetcher.
    pub fn requests(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requested)
    }
}

impl AssetFetcher for StaticFetcher {
    fn fetch_headers(&self, url: &str) -> Result<AssetResponse, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(AssetResponse {
            url: url.to_string(),
            status: 200,
            cache_control: self.cache_control.clone(),
        })
    }
}
