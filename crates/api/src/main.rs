//! OpsBoard - operations reporting CLI
//!
//! Main entry point for the `opsboard` binary.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use opsboard_infra::config;
use opsboard_lib::utils::init_tracing;
use opsboard_lib::{dispatch, AppContext, Cli};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Before config loading so `.env` can supply OPSBOARD_* variables
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = config::load(cli.config.clone()).context("failed to load configuration")?;
    init_tracing(&config.logging);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(err) => tracing::debug!(error = %err, "No .env loaded"),
    }

    let ctx = AppContext::new(config).context("failed to initialise application context")?;

    let (output, code) = match dispatch(&ctx, cli.command).await {
        Ok(value) => (value, ExitCode::SUCCESS),
        Err(err) => (json!({ "error": err }), ExitCode::FAILURE),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}
