//! Rendering of command results as a table or JSON.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use hookhub_core::result::AppResult;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON array
    Json,
}

/// Renders `rows` in `format`. An empty table renders as a notice line.
pub fn render_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Table if rows.is_empty() => Ok("(no rows)".to_string()),
        OutputFormat::Table => Ok(Table::new(rows).with(Style::modern()).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
    }
}

/// Renders `rows` and writes them to stdout.
pub fn print_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> AppResult<()> {
    println!("{}", render_rows(rows, format)?);
    Ok(())
}

/// Status line after a command completes.
pub fn print_success(msg: &str) {
    println!("ok: {}", msg);
}

/// Status line for a command that had nothing to do.
pub fn print_warning(msg: &str) {
    println!("warning: {}", msg);
}

/// Error line on stderr.
pub fn print_error(msg: &str) {
    eprintln!("error: {}", msg);
}
