// ==========================================
// Bakery Cost Calculator - configuration layer
// ==========================================
// Process configuration only. Cost settings live
// in the database (see repository::settings_repo).
// ==========================================

pub mod app_config;

pub use app_config::{default_db_path, AppConfig, LogFormat, ENV_DB_PATH, ENV_LOG_FORMAT};
