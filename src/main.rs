// ==========================================
// Bakery Cost Calculator - CLI entry point
// ==========================================
// Results are printed to stdout as JSON.
// Failures print an error body to stderr and exit 1.
// ==========================================

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use bakery_cost::api::ApiError;
use bakery_cost::app::AppState;
use bakery_cost::cli::{execute, Cli};
use bakery_cost::config::AppConfig;
use bakery_cost::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::default().with_overrides(cli.db.clone(), cli.log_format);
    logging::init_with(config.log_format);

    tracing::debug!(
        version = bakery_cost::VERSION,
        db_path = %config.db_path,
        "{} starting",
        bakery_cost::APP_NAME
    );

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &AppConfig) -> Result<(), ApiError> {
    let state = AppState::new(config.db_path.clone())?;
    let output = execute(&state, cli.command)?;
    print_json(&output)?;
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

fn report_error(err: &ApiError) {
    tracing::error!(code = err.code(), "{}", err);
    match serde_json::to_string_pretty(&err.to_response()) {
        Ok(body) => eprintln!("{}", body),
        Err(_) => eprintln!("{}: {}", err.code(), err),
    }
}
