// ==========================================
// Bakery Cost Calculator - application configuration
// ==========================================
// Flags and their environment variables are read by
// clap; anything unset keeps the default here.
// ==========================================

use std::path::PathBuf;

/// Environment fallback for `--db`
pub const ENV_DB_PATH: &str = "BAKERY_COST_DB";
/// Environment fallback for `--log-format` (text | json)
pub const ENV_LOG_FORMAT: &str = "BAKERY_COST_LOG_FORMAT";

const DB_FILE_NAME: &str = "bakery_cost.db";

// ==========================================
// LogFormat
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

// ==========================================
// AppConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Apply explicit overrides (CLI flags).
    pub fn with_overrides(mut self, db_path: Option<String>, log_format: Option<LogFormat>) -> Self {
        if let Some(path) = db_path.filter(|p| !p.trim().is_empty()) {
            self.db_path = path;
        }
        if let Some(format) = log_format {
            self.log_format = format;
        }
        self
    }
}

/// Default database location under the user data directory.
///
/// Debug builds use a separate directory so development data stays apart.
/// Falls back to the working directory when no data directory exists.
pub fn default_db_path() -> String {
    let mut path = PathBuf::from(".").join(DB_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        let dir = data_dir.join("bakery-cost-dev");
        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("bakery-cost");

        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DB_FILE_NAME);
        }
    }

    path.to_string_lossy().to_string()
}
