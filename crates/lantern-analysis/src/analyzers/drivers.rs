//! Cache, session, queue and logging drivers.

use lantern_core::errors::AnalysisResult;
use lantern_core::{Issue, Severity};

use super::context::AnalysisContext;
use super::traits::{Analyzer, Outcome};
use crate::php::PhpValue;

pub struct CacheDriverAnalyzer;

impl Analyzer for CacheDriverAnalyzer {
    fn id(&self) -> &'static str {
        "cache-driver"
    }

    fn title(&self) -> &'static str {
        "Cache driver"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn time_to_fix(&self) -> u32 {
        60
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let config = ctx.project.config();
        let Some(store) = config.get_str("cache.default") else {
            return Ok(Outcome::passed("No default cache store is configured."));
        };
        let key = format!("cache.stores.{store}.driver");
        let Some(driver) = config.get_str(&key) else {
            return Ok(Outcome::passed(format!("Cache store '{store}' has no static driver.")));
        };

        let env = ctx.environment();
        let issue = |severity, message: String, recommendation: &str| {
            Issue::new(severity, message, recommendation)
                .with_meta("config_key", key.clone())
                .with_meta("driver", driver)
        };

        let outcome = match driver {
            "null" => Outcome::failed("The null cache driver is in use.").with_issue(issue(
                Severity::Critical,
                "The null driver caches nothing, so every cache read misses.".to_string(),
                "Set CACHE_DRIVER (cache.default) to redis, memcached or dynamodb.",
            )),
            "array" if !env.is_local() => Outcome::failed("The array cache driver is in use.")
                .with_issue(issue(
                    Severity::Major,
                    format!("The array driver only lives for one request in the {env} environment."),
                    "Set CACHE_DRIVER (cache.default) to redis or memcached.",
                )),
            "file" | "database" if env.is_production() => {
                Outcome::warning(format!("The {driver} cache driver is in use in production."))
                    .with_issue(issue(
                        Severity::Minor,
                        format!("The {driver} driver is slower than an in-memory store."),
                        "Switch cache.default to redis or memcached.",
                    ))
            }
            _ => Outcome::passed(format!("The {driver} cache driver is appropriate.")),
        };
        Ok(outcome)
    }
}

pub struct SessionDriverAnalyzer;

impl Analyzer for SessionDriverAnalyzer {
    fn id(&self) -> &'static str {
        "session-driver"
    }

    fn title(&self) -> &'static str {
        "Session driver"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn time_to_fix(&self) -> u32 {
        60
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let Some(driver) = ctx.project.config().get_str("session.driver") else {
            return Ok(Outcome::passed("No static session driver is configured."));
        };
        let env = ctx.environment();

        let outcome = match driver {
            "array" if !env.is_local_or_testing() => {
                Outcome::failed("The array session driver is in use.").with_issue(
                    Issue::new(
                        Severity::Critical,
                        format!("Sessions are not persisted between requests in the {env} environment."),
                        "Set SESSION_DRIVER (session.driver) to redis, memcached or cookie.",
                    )
                    .with_meta("config_key", "session.driver")
                    .with_meta("driver", driver),
                )
            }
            "file" | "database" if env.is_production() => {
                Outcome::warning(format!("The {driver} session driver is in use in production."))
                    .with_issue(
                        Issue::new(
                            Severity::Minor,
                            format!("The {driver} session driver adds I/O to every request."),
                            "Set SESSION_DRIVER (session.driver) to redis or memcached.",
                        )
                        .with_meta("config_key", "session.driver")
                        .with_meta("driver", driver),
                    )
            }
            _ => Outcome::passed(format!("The {driver} session driver is appropriate.")),
        };
        Ok(outcome)
    }
}

pub struct QueueDriverAnalyzer;

impl Analyzer for QueueDriverAnalyzer {
    fn id(&self) -> &'static str {
        "queue-driver"
    }

    fn title(&self) -> &'static str {
        "Queue driver"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn time_to_fix(&self) -> u32 {
        60
    }

    fn should_run(&self, ctx: &AnalysisContext) -> bool {
        !ctx.environment().is_local()
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let config = ctx.project.config();
        let Some(connection) = config.get_str("queue.default") else {
            return Ok(Outcome::passed("No default queue connection is configured."));
        };
        let key = format!("queue.connections.{connection}.driver");
        let Some(driver) = config.get_str(&key) else {
            return Ok(Outcome::passed(format!(
                "Queue connection '{connection}' has no static driver."
            )));
        };
        let production = ctx.environment().is_production();

        let issue = |severity, message: &str, recommendation: &str| {
            Issue::new(severity, message, recommendation)
                .with_meta("config_key", key.clone())
                .with_meta("driver", driver)
        };

        let outcome = match driver {
            "null" => Outcome::failed("The null queue driver is in use.").with_issue(issue(
                Severity::Critical,
                "Queued jobs are discarded by the null driver.",
                "Set QUEUE_CONNECTION (queue.default) to redis, sqs or beanstalkd.",
            )),
            "sync" if production => Outcome::failed("The sync queue driver is in use in production.")
                .with_issue(issue(
                    Severity::Major,
                    "Jobs run inside the request that dispatches them.",
                    "Set QUEUE_CONNECTION (queue.default) to redis, sqs or beanstalkd and run a worker.",
                )),
            "database" if production => {
                Outcome::warning("The database queue driver is in use in production.").with_issue(
                    issue(
                        Severity::Minor,
                        "Polling the database for jobs adds load to the primary database.",
                        "Set QUEUE_CONNECTION (queue.default) to redis or sqs.",
                    ),
                )
            }
            _ => Outcome::passed(format!("The {driver} queue driver is appropriate.")),
        };
        Ok(outcome)
    }
}

pub struct LogLevelAnalyzer;

impl LogLevelAnalyzer {
    /// Level of a channel; Monolog handlers default to `debug`.
    /// `None` when the channel is undefined or its level cannot be
    /// determined statically.
    fn channel_level(ctx: &AnalysisContext, channel: &str) -> Option<String> {
        let config = ctx.project.config();
        config.get_array(&format!("logging.channels.{channel}"))?;
        match config.get(&format!("logging.channels.{channel}.level")) {
            None | Some(PhpValue::Null) => Some("debug".to_string()),
            Some(value) => value.as_str().map(str::to_ascii_lowercase),
        }
    }

    /// Channels whose effective level is `debug`. Stack channels are
    /// resolved one level deep.
    fn debug_channels(ctx: &AnalysisContext, default: &str) -> Vec<String> {
        let config = ctx.project.config();
        let driver = config.get_str(&format!("logging.channels.{default}.driver"));
        let members: Vec<String> = if driver == Some("stack") {
            config
                .get_array(&format!("logging.channels.{default}.channels"))
                .map(|channels| {
                    channels
                        .values()
                        .filter_map(|v| v.as_str())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        } else {
            vec![default.to_string()]
        };
        members
            .into_iter()
            .filter(|channel| Self::channel_level(ctx, channel).as_deref() == Some("debug"))
            .collect()
    }
}

impl Analyzer for LogLevelAnalyzer {
    fn id(&self) -> &'static str {
        "log-level"
    }

    fn title(&self) -> &'static str {
        "Log level"
    }

    fn severity(&self) -> Severity {
        Severity::Minor
    }

    fn time_to_fix(&self) -> u32 {
        5
    }

    fn should_run(&self, ctx: &AnalysisContext) -> bool {
        ctx.environment().is_production()
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let Some(default) = ctx.project.config().get_str("logging.default") else {
            return Ok(Outcome::passed("No default log channel is configured."));
        };
        let debug = Self::debug_channels(ctx, default);
        if debug.is_empty() {
            return Ok(Outcome::passed("Production logging is above debug level."));
        }

        let issues = debug.iter().map(|channel| {
            Issue::new(
                Severity::Minor,
                format!("Log channel '{channel}' records debug messages in production."),
                "Set LOG_LEVEL (or the channel's level) to warning or higher.",
            )
            .with_meta("config_key", format!("logging.channels.{channel}.level"))
        });
        Ok(Outcome::warning("Debug-level logging is enabled in production.").with_issues(issues))
    }
}
