//! hookhub: plugin hook registry host.
//!
//! Loads configuration, wires the application context, registers the
//! declared plugins, and runs the requested command against them.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use hookhub_core::config::AppConfig;
use hookhub_core::context::Finalizable;
use hookhub_core::error::AppError;
use hookhub_plugin::api::{AppContext, AppContextSlot};

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&cli, config).await {
        tracing::error!(error = %e, "Command failed");
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

async fn run(cli: &Cli, config: AppConfig) -> Result<(), AppError> {
    tracing::info!(config = %cli.config, "Starting hookhub v{}", env!("CARGO_PKG_VERSION"));

    let slot = AppContextSlot::new();
    slot.inject(Arc::new(AppContext::new(config)));

    let ctx = slot.get()?;
    let result = match ctx.register_declared_plugins().await {
        Ok(_) => cli.execute(&ctx).await,
        Err(e) => Err(e),
    };

    if let Some(ctx) = slot.take() {
        ctx.finalize();
    }

    result
}
