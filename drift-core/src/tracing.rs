//! Structured logging setup shared by the CLI, the MCP server, and test binaries.
//! Defaults to human-readable output; set `DRIFT_LOG_FORMAT=json` for the CI/agent
//! pipeline, where logs are ingested rather than read on a terminal.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. Safe to call once per process;
/// a second call is a no-op (the underlying `set_global_default` error is swallowed,
/// which matters for test binaries that each spin up their own subscriber).
pub fn init() {
    let filter = EnvFilter::try_from_env("DRIFT_LOG")
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("DRIFT_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let result = if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already initialized");
    }
}
