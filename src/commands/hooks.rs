//! Hook listing command.

use serde::Serialize;
use tabled::Tabled;

use hookhub_core::error::AppError;
use hookhub_plugin::api::AppContext;

use crate::output::{self, OutputFormat};

/// Hook display row for table output
#[derive(Debug, Serialize, Tabled)]
struct HookRow {
    /// Owning plugin
    plugin: String,
    /// Endpoint name
    endpoint: String,
    /// Hook name
    hook: String,
    /// Element type installed at the endpoint
    module: String,
    /// Whether the element type was autogenerated
    placeholder: bool,
}

/// Execute the hooks command
pub async fn execute(ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let mut rows = Vec::new();

    for manager in ctx.plugins.managers().await {
        for hook in manager.hooks() {
            rows.push(HookRow {
                plugin: manager.plugin_name().to_string(),
                endpoint: hook.endpoint_name().to_string(),
                hook: hook.name().to_string(),
                module: hook.module_name().to_string(),
                placeholder: hook.is_placeholder(),
            });
        }
    }

    output::print_rows(&rows, format)
}
