//! Tracing subscriber setup shared by the CLI and integration tests.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides every other log level source.
pub const LOG_ENV_VAR: &str = "LANTERN_LOG";

/// Install a global fmt subscriber writing to stderr.
///
/// Filter precedence: `LANTERN_LOG`, then `fallback` (CLI verbosity or the
/// `[logging] level` key). Calling this twice is harmless; the second
/// installation attempt is ignored.
pub fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Map a `-v` count to a filter directive, if any.
pub fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}
