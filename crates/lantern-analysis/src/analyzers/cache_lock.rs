//! Atomic locks that share a Redis connection with the application cache.

use lantern_core::errors::AnalysisResult;
use lantern_core::{Issue, Severity};

use super::context::AnalysisContext;
use super::traits::{Analyzer, Outcome};
use crate::php::literal::short_name;
use crate::php::{CallKind, CallSite};

pub struct SharedCacheLockAnalyzer;

impl SharedCacheLockAnalyzer {
    /// `Cache::lock()`, `cache()->lock()` and `Cache::store(..)->lock()`.
    pub fn is_lock_call(call: &CallSite) -> bool {
        if !call.is_named("lock") {
            return false;
        }
        match call.kind {
            CallKind::Static => call.receiver_name().is_some_and(|r| short_name(r) == "Cache"),
            CallKind::Method => call.receiver.as_deref().is_some_and(|receiver| {
                let receiver = receiver.trim_start_matches('\\');
                receiver == "cache()"
                    || receiver.starts_with("cache()->store(")
                    || is_cache_store_call(receiver)
            }),
            CallKind::Function => false,
        }
    }
}

fn is_cache_store_call(receiver: &str) -> bool {
    receiver
        .split_once("::")
        .is_some_and(|(class, rest)| short_name(class) == "Cache" && rest.starts_with("store("))
}

impl Analyzer for SharedCacheLockAnalyzer {
    fn id(&self) -> &'static str {
        "shared-cache-lock"
    }

    fn title(&self) -> &'static str {
        "Cache locks share the cache connection"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn time_to_fix(&self) -> u32 {
        30
    }

    fn should_run(&self, ctx: &AnalysisContext) -> bool {
        ctx.default_cache_driver() == Some("redis")
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let config = ctx.project.config();
        let store = config.get_str("cache.default").unwrap_or("redis");
        let connection = config
            .get_str(&format!("cache.stores.{store}.connection"))
            .unwrap_or("default");
        let lock_connection = config.get_str(&format!("cache.stores.{store}.lock_connection"));
        if lock_connection.is_some_and(|lock| lock != connection) {
            return Ok(Outcome::passed("Cache locks use a dedicated Redis connection."));
        }

        let sources = ctx.sources()?;
        let issues: Vec<Issue> = sources
            .calls()
            .filter(|(_, call)| Self::is_lock_call(call))
            .map(|(path, call)| {
                Issue::new(
                    Severity::Major,
                    format!(
                        "Lock acquired on the '{connection}' Redis connection, which the cache also uses."
                    ),
                    format!(
                        "Set cache.stores.{store}.lock_connection to a separate Redis connection so \
                         `cache:clear` does not release held locks."
                    ),
                )
                .at(path, call.line)
                .with_meta("column", call.column)
            })
            .collect();

        if issues.is_empty() {
            return Ok(Outcome::passed("No cache locks are acquired."));
        }
        Ok(Outcome::failed(format!(
            "{} cache locks share a connection with the application cache.",
            issues.len()
        ))
        .with_issues(issues))
    }
}
