use std::str::FromStr;
use tracing::Level;

pub const LOG_LEVEL_ENV: &str = "LMS_LOG_LEVEL";

// log level from LMS_LOG_LEVEL, falling back to INFO for missing or unknown values
pub(crate) fn log_level(value: Option<String>) -> Level {
    value.and_then(|v| Level::from_str(v.trim()).ok()).unwrap_or(Level::INFO)
}

// JSON log lines without module targets, ANSI colors or timestamps, so the
// runtime's log collector can ingest them as-is.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(log_level(std::env::var(LOG_LEVEL_ENV).ok()))
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .json()
        .init();
}
