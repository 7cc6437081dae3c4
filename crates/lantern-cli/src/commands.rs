//! Subcommand implementations.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use lantern_analysis::analyzers::Analyzer;
use lantern_analysis::report::{reporter_for, Reporter};
use lantern_analysis::{create_default_registry, AnalysisEngine, LaravelProject};
use lantern_core::tracing::{init_tracing, verbosity_directive};
use lantern_core::LanternConfig;

use crate::args::AnalyzeArgs;

/// Exit status when `--ci` is set and the report has failures.
const EXIT_FAILURES: u8 = 1;

/// CLI verbosity wins over the configured level; `LANTERN_LOG` wins over both.
pub fn init_logging(verbose: u8, config: Option<&LanternConfig>) {
    let level = verbosity_directive(verbose)
        .map(str::to_string)
        .or_else(|| config.map(|c| c.logging.level.clone()))
        .unwrap_or_else(|| "warn".to_string());
    init_tracing(&level);
}

/// Fold command line flags over the file configuration.
fn apply_overrides(config: &mut LanternConfig, args: &AnalyzeArgs) {
    if let Some(env) = &args.environment {
        config.analysis.environment = Some(env.clone());
    }
    if let Some(format) = args.format {
        config.report.format = format;
    }
    if !args.only.is_empty() {
        config.analysis.only = args.only.clone();
    }
    config.analysis.exclude.extend(args.exclude.iter().cloned());
    if let Some(url) = &args.base_url {
        config.http.base_url = Some(url.clone());
    }
    if args.fail_on_warning {
        config.analysis.fail_on_warning = true;
    }
}

pub fn analyze(args: AnalyzeArgs, verbose: u8) -> Result<ExitCode> {
    let mut config = LanternConfig::resolve(&args.path, args.config.as_deref())
        .context("failed to load configuration")?;
    apply_overrides(&mut config, &args);
    config.validate().context("invalid configuration")?;
    init_logging(verbose, Some(&config));

    let project = LaravelProject::open(&args.path)
        .with_context(|| format!("cannot analyze {}", args.path.display()))?;

    let fail_on_warning = config.analysis.fail_on_warning;
    let reporter = reporter_for(config.report.format);
    let engine = AnalysisEngine::new(create_default_registry(), config)
        .context("failed to set up the HTTP client")?;
    let report = engine.run(&project);

    let rendered = reporter
        .render(&report)
        .with_context(|| format!("failed to render {} report", reporter.name()))?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write report")?;

    if args.ci && report.has_failures(fail_on_warning) {
        return Ok(ExitCode::from(EXIT_FAILURES));
    }
    Ok(ExitCode::SUCCESS)
}

pub fn list() -> Result<ExitCode> {
    let registry = create_default_registry();
    let mut stdout = std::io::stdout().lock();
    for analyzer in registry.all() {
        writeln!(
            stdout,
            "{:<26} {:<9} {}",
            analyzer.id(),
            analyzer.severity().name(),
            analyzer.title()
        )?;
    }
    Ok(ExitCode::SUCCESS)
}
