// ==========================================
// Logging initialization
// ==========================================
// tracing + tracing-subscriber, level from RUST_LOG.
// Output goes to stderr; stdout carries command results.
// ==========================================

use crate::config::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize human-readable logging.
///
/// # Environment
/// - RUST_LOG: filter directive (default: warn)
///   e.g. RUST_LOG=debug or RUST_LOG=bakery_cost=trace
///
/// # Example
/// ```no_run
/// use bakery_cost::logging;
/// logging::init();
/// ```
pub fn init() {
    fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Initialize newline-delimited JSON logging.
pub fn init_json() {
    fmt()
        .json()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_current_span(true)
        .init();
}

pub fn init_with(format: LogFormat) {
    match format {
        LogFormat::Text => init(),
        LogFormat::Json => init_json(),
    }
}

/// Test logging at debug level, safe to call repeatedly.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
