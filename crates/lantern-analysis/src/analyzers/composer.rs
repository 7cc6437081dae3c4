//! Composer autoloader and installed dependencies.

use lantern_core::errors::AnalysisResult;
use lantern_core::{Issue, Severity};

use super::context::AnalysisContext;
use super::traits::{Analyzer, Outcome};
use crate::project::InstalledJson;

pub struct AutoloaderOptimizationAnalyzer;

impl AutoloaderOptimizationAnalyzer {
    /// An optimized classmap lists the application's own PSR-4 classes;
    /// a plain `composer install` only lists classmap-autoloaded ones.
    fn classmap_covers_app(classmap: &str, app_dirs: &[String]) -> bool {
        app_dirs.iter().any(|dir| {
            let needle = format!("$baseDir . '/{dir}/");
            classmap.contains(&needle)
        })
    }
}

impl Analyzer for AutoloaderOptimizationAnalyzer {
    fn id(&self) -> &'static str {
        "autoloader-optimization"
    }

    fn title(&self) -> &'static str {
        "Composer autoloader optimization"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn time_to_fix(&self) -> u32 {
        5
    }

    fn should_run(&self, ctx: &AnalysisContext) -> bool {
        !ctx.environment().is_local() && ctx.project.vendor_path().join("composer").is_dir()
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let composer = ctx.project.composer_json();
        if composer.is_some_and(|c| c.config.optimizes_autoloader()) {
            return Ok(Outcome::passed(
                "composer.json enables autoloader optimization.",
            ));
        }

        let mut app_dirs = composer.map(|c| c.psr4_directories()).unwrap_or_default();
        if app_dirs.is_empty() {
            app_dirs.push("app".to_string());
        }
        if let Some(classmap) = ctx.project.autoload_classmap()? {
            if Self::classmap_covers_app(&classmap, &app_dirs) {
                return Ok(Outcome::passed("The Composer classmap is optimized."));
            }
        }

        Ok(Outcome::failed("The Composer autoloader is not optimized.").with_issue(
            Issue::new(
                Severity::Major,
                "Classes are resolved through PSR-4 filesystem lookups on every request.",
                "Deploy with `composer install --optimize-autoloader --no-dev` or set \
                 config.optimize-autoloader in composer.json.",
            )
            .in_file("vendor/composer/autoload_classmap.php"),
        ))
    }
}

pub struct DevDependenciesAnalyzer;

impl Analyzer for DevDependenciesAnalyzer {
    fn id(&self) -> &'static str {
        "dev-dependencies"
    }

    fn title(&self) -> &'static str {
        "Dev dependencies installed"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn time_to_fix(&self) -> u32 {
        5
    }

    fn should_run(&self, ctx: &AnalysisContext) -> bool {
        !ctx.environment().is_local()
            && ctx.project.vendor_path().join("composer/installed.json").is_file()
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let Some(installed) = ctx.project.installed_packages()? else {
            return Ok(Outcome::passed("No installed packages found."));
        };

        let dev_installed: Vec<String> = match &installed {
            InstalledJson::V2 {
                dev,
                dev_package_names,
                ..
            } => {
                if *dev == Some(true) {
                    dev_package_names.clone()
                } else {
                    Vec::new()
                }
            }
            InstalledJson::V1(_) => {
                let names = installed.package_names();
                ctx.project
                    .composer_lock()?
                    .map(|lock| {
                        lock.packages_dev
                            .into_iter()
                            .map(|p| p.name)
                            .filter(|name| names.contains(&name.as_str()))
                            .collect()
                    })
                    .unwrap_or_default()
            }
        };

        if dev_installed.is_empty() {
            return Ok(Outcome::passed("No dev dependencies are installed."));
        }

        Ok(
            Outcome::failed(format!("{} dev dependencies are installed.", dev_installed.len()))
                .with_issue(
                    Issue::new(
                        Severity::Major,
                        format!(
                            "Development packages are installed in the {} environment.",
                            ctx.environment()
                        ),
                        "Deploy with `composer install --no-dev`.",
                    )
                    .in_file("vendor/composer/installed.json")
                    .with_meta("packages", dev_installed),
                ),
        )
    }
}
