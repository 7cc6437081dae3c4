//! Long-lived `Cache-Control` headers on compiled Mix and Vite assets.

use lantern_core::errors::AnalysisResult;
use lantern_core::{Issue, Severity};

use super::context::AnalysisContext;
use super::traits::{Analyzer, Outcome};
use crate::assets::{
    collect_vite_files, is_long_lived, join_url, MixManifest, ViteManifest, ONE_DAY_SECS,
};

pub struct CacheHeadersAnalyzer;

impl CacheHeadersAnalyzer {
    /// Every versioned asset URL named by the Mix and Vite manifests.
    pub fn asset_urls(ctx: &AnalysisContext, base: &str) -> AnalysisResult<Vec<String>> {
        let project = ctx.project;
        let config = project.config();
        let public = project.public_path();
        let mut urls = Vec::new();

        if let Some(mix) = MixManifest::load(&public)? {
            let mix_base = config
                .get_str("app.mix_url")
                .filter(|u| !u.is_empty())
                .unwrap_or(base);
            urls.extend(mix.versioned_paths().map(|p| join_url(mix_base, p)));
        }

        let build = ViteManifest::DEFAULT_BUILD_DIR;
        if let Some(vite) = ViteManifest::load(&public, build)? {
            let asset_base = config
                .get_str("app.asset_url")
                .filter(|u| !u.is_empty())
                .unwrap_or(base);
            let files = collect_vite_files(&vite, ctx.config.http.max_manifest_depth);
            urls.extend(
                files
                    .iter()
                    .map(|file| join_url(asset_base, &format!("{build}/{file}"))),
            );
        }

        let mut seen = lantern_core::FxHashSet::default();
        urls.retain(|u| seen.insert(u.clone()));
        Ok(urls)
    }
}

impl Analyzer for CacheHeadersAnalyzer {
    fn id(&self) -> &'static str {
        "cache-headers"
    }

    fn title(&self) -> &'static str {
        "Cache headers on compiled assets"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn time_to_fix(&self) -> u32 {
        30
    }

    fn should_run(&self, ctx: &AnalysisContext) -> bool {
        let public = ctx.project.public_path();
        !ctx.environment().is_local()
            && ctx.base_url().is_some()
            && (public.join(MixManifest::FILE_NAME).is_file()
                || ViteManifest::locate(&public, ViteManifest::DEFAULT_BUILD_DIR).is_some())
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let Some(base) = ctx.base_url() else {
            return Ok(Outcome::passed("No base URL to probe."));
        };
        let urls = Self::asset_urls(ctx, base)?;
        let threshold = ctx.config.http.uncached_asset_threshold;

        let mut issues = Vec::new();
        let mut uncached = 0usize;
        for url in &urls {
            if uncached >= threshold {
                tracing::debug!(threshold, "uncached asset threshold reached; stopping probes");
                break;
            }
            match ctx.fetcher.fetch_headers(url) {
                Ok(response) if !response.is_success() => issues.push(
                    Issue::new(
                        Severity::Minor,
                        format!("{url} answered with HTTP {}.", response.status),
                        "Make sure the compiled assets are deployed and served.",
                    )
                    .with_meta("url", url.as_str())
                    .with_meta("status", response.status),
                ),
                Ok(response) if !is_long_lived(response.cache_control.as_deref()) => {
                    uncached += 1;
                    let mut issue = Issue::new(
                        Severity::Major,
                        format!("{url} is not cached by browsers for at least a day."),
                        format!(
                            "Serve versioned assets with `Cache-Control: public, max-age={}` or longer.",
                            ONE_DAY_SECS * 365
                        ),
                    )
                    .with_meta("url", url.as_str());
                    if let Some(header) = response.cache_control {
                        issue = issue.with_meta("cache_control", header);
                    }
                    issues.push(issue);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "asset probe failed");
                    issues.push(
                        Issue::new(
                            Severity::Minor,
                            format!("{url} could not be fetched: {e}"),
                            "Check that the application is reachable at the configured base URL.",
                        )
                        .with_meta("url", url.as_str()),
                    );
                }
            }
        }

        if issues.is_empty() {
            return Ok(Outcome::passed(format!(
                "All {} compiled assets are served with long-lived cache headers.",
                urls.len()
            )));
        }
        let message = if uncached > 0 {
            format!("{uncached} compiled assets lack long-lived cache headers.")
        } else {
            format!("{} compiled assets could not be checked.", issues.len())
        };
        Ok(Outcome::failed(message).with_issues(issues))
    }
}
