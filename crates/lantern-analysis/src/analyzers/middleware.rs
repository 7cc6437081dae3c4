//! Global HTTP middleware that runs on every request without doing anything.

use std::path::{Path, PathBuf};

use lantern_core::errors::AnalysisResult;
use lantern_core::{Issue, Severity};

use super::context::AnalysisContext;
use super::traits::{Analyzer, Outcome};
use crate::php::literal::{node_line, short_name};
use crate::php::{find_property, ConfigEvaluator, PhpParser, PhpValue};

const KERNEL_PATH: &str = "app/Http/Kernel.php";

pub struct UnusedGlobalMiddlewareAnalyzer;

impl UnusedGlobalMiddlewareAnalyzer {
    /// Evaluate a property's default value from a PHP class file.
    /// Returns `(line, value)`; `value` is `None` when declared without one.
    fn read_property(
        ctx: &AnalysisContext,
        parser: &mut PhpParser,
        path: &Path,
        property: &str,
    ) -> AnalysisResult<Option<(u32, Option<PhpValue>)>> {
        let source = match std::fs::read(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read class file");
                return Ok(None);
            }
        };
        let tree = parser.parse(&source, path)?;
        let Some(decl) = find_property(&tree, &source, property) else {
            return Ok(None);
        };
        let evaluator = ConfigEvaluator::new(ctx.project.env(), ctx.project.base_path());
        let value = decl.default.map(|node| evaluator.eval(&node, &source));
        Ok(Some((node_line(&decl.name), value)))
    }

    /// `App\Http\Middleware\TrustProxies` → `app/Http/Middleware/TrustProxies.php`.
    fn app_class_path(ctx: &AnalysisContext, class: &str) -> Option<PathBuf> {
        let rest = class.strip_prefix("App\\")?;
        let path = ctx
            .project
            .app_path()
            .join(format!("{}.php", rest.replace('\\', "/")));
        path.is_file().then_some(path)
    }

    fn proxies_configured(
        ctx: &AnalysisContext,
        parser: &mut PhpParser,
        class: &str,
    ) -> AnalysisResult<bool> {
        if ctx.project.config().is_filled("trustedproxy.proxies") {
            return Ok(true);
        }
        let Some(path) = Self::app_class_path(ctx, class) else {
            return Ok(false);
        };
        let configured = match Self::read_property(ctx, parser, &path, "proxies")? {
            Some((_, Some(value))) => match value {
                PhpValue::Null => false,
                PhpValue::String(s) => !s.is_empty(),
                PhpValue::Array(a) => !a.is_empty(),
                _ => true,
            },
            _ => false,
        };
        Ok(configured)
    }
}

impl Analyzer for UnusedGlobalMiddlewareAnalyzer {
    fn id(&self) -> &'static str {
        "unused-global-middleware"
    }

    fn title(&self) -> &'static str {
        "Unused global middleware"
    }

    fn severity(&self) -> Severity {
        Severity::Minor
    }

    fn time_to_fix(&self) -> u32 {
        5
    }

    fn should_run(&self, ctx: &AnalysisContext) -> bool {
        ctx.project.path(KERNEL_PATH).is_file()
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let mut parser = PhpParser::new()?;
        let kernel = ctx.project.path(KERNEL_PATH);
        let Some((line, Some(PhpValue::Array(middleware)))) =
            Self::read_property(ctx, &mut parser, &kernel, "middleware")?
        else {
            return Ok(Outcome::passed("No global middleware stack is declared."));
        };

        let mut issues = Vec::new();
        for class in middleware.values().filter_map(|v| v.as_str()) {
            match short_name(class) {
                "TrustProxies" if !Self::proxies_configured(ctx, &mut parser, class)? => {
                    issues.push(
                        Issue::new(
                            Severity::Minor,
                            "TrustProxies runs globally but no trusted proxies are configured.",
                            "Remove TrustProxies from $middleware or set its $proxies property.",
                        )
                        .at(KERNEL_PATH, line)
                        .with_meta("middleware", class),
                    );
                }
                "HandleCors" if !ctx.project.config().is_filled("cors.paths") => {
                    issues.push(
                        Issue::new(
                            Severity::Minor,
                            "HandleCors runs globally but cors.paths is empty.",
                            "Remove HandleCors from $middleware or configure cors.paths.",
                        )
                        .at(KERNEL_PATH, line)
                        .with_meta("middleware", class),
                    );
                }
                _ => {}
            }
        }

        if issues.is_empty() {
            Ok(Outcome::passed("Every global middleware is in use."))
        } else {
            Ok(Outcome::failed(format!(
                "{} global middleware never do any work.",
                issues.len()
            ))
            .with_issues(issues))
        }
    }
}
