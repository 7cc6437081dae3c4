//! Framework cache files: configuration, routes and compiled views.

use std::path::{Path, PathBuf};

use lantern_core::errors::AnalysisResult;
use lantern_core::{Issue, Severity};

use super::context::AnalysisContext;
use super::traits::{Analyzer, Outcome};

/// Shared rule for artisan-generated caches: a stale cache hides changes
/// while developing, a missing one costs every production request.
fn cache_file_outcome(
    ctx: &AnalysisContext,
    what: &str,
    path: &Path,
    cache_command: &str,
    clear_command: &str,
) -> Outcome {
    let cached = path.is_file();
    let relative = path
        .strip_prefix(ctx.project.base_path())
        .unwrap_or(path)
        .to_path_buf();

    if ctx.environment().is_local() && cached {
        return Outcome::failed(format!("{what} is cached in the local environment.")).with_issue(
            Issue::new(
                Severity::Minor,
                format!("{what} is cached while developing, so edits will not take effect."),
                format!("Run `{clear_command}` and avoid caching in local development."),
            )
            .in_file(relative),
        );
    }
    if !ctx.environment().is_local() && !cached {
        return Outcome::failed(format!("{what} is not cached.")).with_issue(
            Issue::new(
                Severity::Major,
                format!(
                    "{what} is rebuilt on every request in the {} environment.",
                    ctx.environment()
                ),
                format!("Run `{cache_command}` as part of your deployment."),
            )
            .with_meta("expected_path", relative.display().to_string()),
        );
    }
    Outcome::passed(format!("{what} caching is set up correctly."))
}

pub struct ConfigCachingAnalyzer;

impl Analyzer for ConfigCachingAnalyzer {
    fn id(&self) -> &'static str {
        "config-caching"
    }

    fn title(&self) -> &'static str {
        "Configuration caching"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn time_to_fix(&self) -> u32 {
        5
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        Ok(cache_file_outcome(
            ctx,
            "Configuration",
            &ctx.project.config_cache_path(),
            "php artisan config:cache",
            "php artisan config:clear",
        ))
    }
}

pub struct RouteCachingAnalyzer;

impl Analyzer for RouteCachingAnalyzer {
    fn id(&self) -> &'static str {
        "route-caching"
    }

    fn title(&self) -> &'static str {
        "Route caching"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn time_to_fix(&self) -> u32 {
        5
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        Ok(cache_file_outcome(
            ctx,
            "Routing",
            &ctx.project.routes_cache_path(),
            "php artisan route:cache",
            "php artisan route:clear",
        ))
    }
}

pub struct ViewCachingAnalyzer;

impl ViewCachingAnalyzer {
    fn view_paths(ctx: &AnalysisContext) -> Vec<PathBuf> {
        let base = ctx.project.base_path();
        let configured: Vec<PathBuf> = ctx
            .project
            .config()
            .get_array("view.paths")
            .map(|paths| paths.values().filter_map(|v| v.as_str()).map(|p| base.join(p)).collect())
            .unwrap_or_default();
        if configured.is_empty() {
            vec![base.join("resources/views")]
        } else {
            configured
        }
    }

    fn compiled_path(ctx: &AnalysisContext) -> PathBuf {
        let base = ctx.project.base_path();
        ctx.project
            .config()
            .get_str("view.compiled")
            .map(|p| base.join(p))
            .unwrap_or_else(|| base.join("storage/framework/views"))
    }
}

impl Analyzer for ViewCachingAnalyzer {
    fn id(&self) -> &'static str {
        "view-caching"
    }

    fn title(&self) -> &'static str {
        "View caching"
    }

    fn severity(&self) -> Severity {
        Severity::Minor
    }

    fn time_to_fix(&self) -> u32 {
        5
    }

    fn should_run(&self, ctx: &AnalysisContext) -> bool {
        !ctx.environment().is_local()
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let templates: usize = Self::view_paths(ctx)
            .iter()
            .map(|dir| count_files(dir, |name| name.ends_with(".blade.php")))
            .sum();
        if templates == 0 {
            return Ok(Outcome::passed("No Blade templates to compile."));
        }

        let compiled_dir = Self::compiled_path(ctx);
        let compiled = count_files(&compiled_dir, |name| name.ends_with(".php"));
        tracing::debug!(templates, compiled, "compared Blade templates with compiled views");

        if compiled < templates {
            return Ok(Outcome::failed("Views are not cached.").with_issue(
                Issue::new(
                    Severity::Minor,
                    format!("{compiled} compiled views found for {templates} Blade templates."),
                    "Run `php artisan view:cache` as part of your deployment.",
                )
                .with_meta("templates", templates)
                .with_meta("compiled", compiled),
            ));
        }
        Ok(Outcome::passed("Blade views are precompiled."))
    }
}

/// Count regular files under `dir` whose name satisfies `matches`.
/// A missing directory counts as empty.
fn count_files(dir: &Path, matches: impl Fn(&str) -> bool) -> usize {
    if !dir.is_dir() {
        return 0;
    }
    ignore::WalkBuilder::new(dir)
        .standard_filters(false)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| entry.file_name().to_str().is_some_and(&matches))
        .count()
}
