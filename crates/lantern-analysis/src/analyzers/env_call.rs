//! `env()` calls outside configuration files return null once the
//! configuration is cached.

use lantern_core::errors::AnalysisResult;
use lantern_core::{Issue, Severity};

use super::context::AnalysisContext;
use super::traits::{Analyzer, Outcome};
use crate::php::literal::short_name;
use crate::php::{CallKind, CallSite};

pub struct EnvCallAnalyzer;

impl EnvCallAnalyzer {
    /// `env()`, `\env()` and `Env::get()`.
    pub fn is_env_call(call: &CallSite) -> bool {
        match call.kind {
            CallKind::Function => call.is_named("env"),
            CallKind::Static => {
                call.is_named("get") && call.receiver_name().is_some_and(|r| short_name(r) == "Env")
            }
            CallKind::Method => false,
        }
    }
}

impl Analyzer for EnvCallAnalyzer {
    fn id(&self) -> &'static str {
        "env-call"
    }

    fn title(&self) -> &'static str {
        "env() calls outside configuration files"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn time_to_fix(&self) -> u32 {
        30
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let issues: Vec<Issue> = ctx
            .sources()?
            .calls()
            .filter(|(_, call)| Self::is_env_call(call))
            .map(|(path, call)| {
                let key = call.first_arg.as_deref().unwrap_or("?");
                let mut issue = Issue::new(
                    Severity::Critical,
                    format!("env('{key}') is read outside the config directory."),
                    "Move the value into a config file and read it with config().",
                )
                .at(path, call.line)
                .with_meta("column", call.column);
                if let Some(key) = &call.first_arg {
                    issue = issue.with_meta("key", key.as_str());
                }
                issue
            })
            .collect();

        if issues.is_empty() {
            return Ok(Outcome::passed("env() is only called from configuration files."));
        }
        Ok(Outcome::failed(format!(
            "{} env() calls will return null once configuration is cached.",
            issues.len()
        ))
        .with_issues(issues))
    }
}
