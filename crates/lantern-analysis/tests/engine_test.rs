//! Runner behaviour: selection, applicability, error and panic isolation,
//! and report rendering.

mod common;

use common::{config_for, Fixture, OfflineFetcher};
use lantern_analysis::analyzers::{AnalysisContext, Analyzer, AnalyzerRegistry, Outcome};
use lantern_analysis::report::{reporter_for, Reporter, TextReporter};
use lantern_analysis::{create_default_registry, AnalysisEngine, Report};
use lantern_core::config::ReportFormat;
use lantern_core::errors::{AnalysisError, AnalysisResult};
use lantern_core::{LanternConfig, Severity, Status};

struct Panicking;

impl Analyzer for Panicking {
    fn id(&self) -> &'static str {
        "panicking"
    }
    fn title(&self) -> &'static str {
        "Always panics"
    }
    fn severity(&self) -> Severity {
        Severity::Minor
    }
    fn time_to_fix(&self) -> u32 {
        1
    }
    fn analyze(&self, _ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        panic!("boom")
    }
}

struct Failing;

impl Analyzer for Failing {
    fn id(&self) -> &'static str {
        "failing"
    }
    fn title(&self) -> &'static str {
        "Always errors"
    }
    fn severity(&self) -> Severity {
        Severity::Minor
    }
    fn time_to_fix(&self) -> u32 {
        1
    }
    fn analyze(&self, _ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        Err(AnalysisError::Failed {
            id: "failing".to_string(),
            message: "cannot inspect".to_string(),
        })
    }
}

struct Skipped;

impl Analyzer for Skipped {
    fn id(&self) -> &'static str {
        "skipped"
    }
    fn title(&self) -> &'static str {
        "Never relevant"
    }
    fn severity(&self) -> Severity {
        Severity::Minor
    }
    fn time_to_fix(&self) -> u32 {
        1
    }
    fn should_run(&self, _ctx: &AnalysisContext) -> bool {
        false
    }
    fn analyze(&self, _ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        Ok(Outcome::failed("must not run"))
    }
}

fn custom_registry() -> AnalyzerRegistry {
    let mut registry = AnalyzerRegistry::new();
    registry.register(Box::new(Panicking));
    registry.register(Box::new(Failing));
    registry.register(Box::new(Skipped));
    registry
}

fn run_custom(config: LanternConfig) -> Report {
    let fixture = Fixture::laravel();
    let engine = AnalysisEngine::with_fetcher(custom_registry(), config, Box::new(OfflineFetcher));
    engine.run(&fixture.open())
}

#[test]
fn default_registry_has_every_analyzer_in_order() {
    let registry = create_default_registry();
    assert_eq!(
        registry.ids(),
        vec![
            "config-caching",
            "route-caching",
            "view-caching",
            "cache-driver",
            "session-driver",
            "queue-driver",
            "log-level",
            "autoloader-optimization",
            "dev-dependencies",
            "unused-global-middleware",
            "shared-cache-lock",
            "env-call",
            "collection-call",
            "cache-headers",
        ]
    );
    assert_eq!(registry.enabled_count(), 14);
}

#[test]
fn registry_enable_disable_and_retain() {
    let mut registry = create_default_registry();
    registry.disable("env-call");
    assert_eq!(registry.enabled_count(), 13);
    registry.enable("env-call");
    assert_eq!(registry.enabled_count(), 14);

    registry.retain_only(&["cache-driver", "session-driver"]);
    assert_eq!(registry.enabled_count(), 2);
    assert_eq!(registry.count(), 14);
    assert_eq!(registry.unknown_ids(&["cache-driver", "nope"]), vec!["nope"]);
}

#[test]
fn panics_and_errors_are_isolated() {
    let report = run_custom(LanternConfig::default());
    assert_eq!(report.runs.len(), 3);

    let panicked = report.run("panicking").unwrap();
    assert_eq!(panicked.status, Status::Errored);
    assert_eq!(panicked.error_code.as_deref(), Some("ANALYZER_PANICKED"));

    let failed = report.run("failing").unwrap();
    assert_eq!(failed.status, Status::Errored);
    assert_eq!(failed.error_code.as_deref(), Some("ANALYZER_FAILED"));

    assert_eq!(report.run("skipped").unwrap().status, Status::NotApplicable);
    assert_eq!(report.summary.errored, 2);
    assert_eq!(report.summary.not_applicable, 1);
    assert!(report.has_failures(false));
}

#[test]
fn excluded_analyzers_are_omitted() {
    let mut config = LanternConfig::default();
    config.analysis.exclude = vec!["panicking".to_string(), "failing".to_string()];
    let report = run_custom(config);
    assert_eq!(report.runs.len(), 1);
    assert!(!report.has_failures(true));
}

#[test]
fn warnings_fail_only_when_requested() {
    let fixture = Fixture::laravel();
    fixture
        .write("config/cache.php", &common::cache_config("file"))
        .write("bootstrap/cache/config.php", "<?php return array ('app' => array ('env' => 'production'), 'cache' => array ('default' => 'f', 'stores' => array ('f' => array ('driver' => 'file'))));");

    let mut config = config_for("production");
    config.analysis.only = vec!["cache-driver".to_string(), "config-caching".to_string()];
    let report = fixture.run(config);

    assert_eq!(report.summary.warning, 1);
    assert_eq!(report.summary.passed, 1);
    assert!(!report.has_failures(false));
    assert!(report.has_failures(true));
}

#[test]
fn environment_override_reaches_the_report() {
    let fixture = Fixture::laravel();
    let report = fixture.run(config_for("staging"));
    assert_eq!(report.environment.name(), "staging");
    assert_eq!(report.summary.total(), report.runs.len());
}

#[test]
fn json_report_round_trips_statuses() {
    let report = run_custom(LanternConfig::default());
    let json = reporter_for(ReportFormat::Json).render(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["environment"], "production");
    assert_eq!(value["runs"][0]["status"], "errored");
    assert_eq!(value["runs"][2]["status"], "not_applicable");
    assert_eq!(value["summary"]["errored"], 2);

    let parsed: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.summary, report.summary);
}

#[test]
fn text_report_has_summary_line() {
    let report = run_custom(LanternConfig::default());
    let text = TextReporter.render(&report).unwrap();
    assert!(text.contains("[ERROR] Always panics (panicking"));
    assert!(text.contains("[SKIP] Never relevant (skipped"));
    assert!(text.contains("3 analyzers: 0 passed, 0 warning, 0 failed, 1 not_applicable, 2 errored"));
}
