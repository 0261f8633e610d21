//! Attach/detach simulation for one endpoint.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::Args;
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use hookhub_core::error::AppError;
use hookhub_plugin::api::AppContext;

use crate::output::{self, OutputFormat};

/// Arguments for the simulate command
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Endpoint to insert
    #[arg(short, long)]
    pub endpoint: String,

    /// JSON bound to each element's `content` property
    #[arg(long, default_value = "null")]
    pub content: String,
}

/// Observation display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ObservationRow {
    /// Owning plugin
    plugin: String,
    /// Hook name
    hook: String,
    /// Element observed by the last-attached wait
    element: String,
    /// Number of attach callbacks fired
    callbacks: usize,
    /// Instances left attached after removal
    remaining: usize,
}

/// Execute the simulate command
pub async fn execute(
    args: &SimulateArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let content: Value = serde_json::from_str(&args.content)?;

    let mut watches = Vec::new();
    for manager in ctx.plugins.managers().await {
        for hook in manager.hooks_for_endpoint(&args.endpoint) {
            let handle = hook.public_api();
            let fired = Arc::new(AtomicUsize::new(0));
            let counter = fired.clone();
            handle.on_attached(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            let wait = handle.get_last_attached();
            watches.push((manager.plugin_name().to_string(), hook, handle, fired, wait));
        }
    }

    if watches.is_empty() {
        output::print_warning(&format!("No hooks installed into '{}'", args.endpoint));
        return Ok(());
    }

    let inserted = ctx.document.insert_endpoint(&args.endpoint, content).await;
    tracing::info!(endpoint = %args.endpoint, elements = inserted.len(), "Simulated insert");

    let observed: Vec<_> = watches
        .into_iter()
        .map(|(plugin, hook, handle, fired, wait)| {
            let element = wait
                .now_or_never()
                .map(|e| format!("{} ({})", e.id(), e.type_name()))
                .unwrap_or_else(|| "pending".to_string());
            (plugin, hook, handle, fired, element)
        })
        .collect();

    ctx.document.remove_endpoint(&args.endpoint);

    let rows: Vec<ObservationRow> = observed
        .into_iter()
        .map(|(plugin, hook, handle, fired, element)| ObservationRow {
            plugin,
            hook: hook.name().to_string(),
            element,
            callbacks: fired.load(Ordering::SeqCst),
            remaining: handle.get_all_attached().len(),
        })
        .collect();

    output::print_rows(&rows, format)?;
    output::print_success(&format!(
        "Inserted and removed {} element(s) at '{}'",
        inserted.len(),
        args.endpoint
    ));

    Ok(())
}
