//! CLI command definitions and dispatch.

pub mod hooks;
pub mod simulate;

use clap::{Parser, Subcommand};

use hookhub_core::error::AppError;
use hookhub_plugin::api::AppContext;

use crate::output::OutputFormat;

/// hookhub: plugin DOM hook registry
#[derive(Debug, Parser)]
#[command(name = "hookhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every hook requested by the configured plugins
    Hooks,
    /// Insert an endpoint and report what each hook observed
    Simulate(simulate::SimulateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, ctx: &AppContext) -> Result<(), AppError> {
        match &self.command {
            Commands::Hooks => hooks::execute(ctx, self.format).await,
            Commands::Simulate(args) => simulate::execute(args, ctx, self.format).await,
        }
    }
}
