// src/lib.rs

pub mod cancel;
pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod output;
pub mod types;
pub mod upload;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

use crate::cancel::TaskCancelFlag;
use crate::cli::CliArgs;
use crate::engine::{Configuration, PluginResult, RunScriptPlugin};
use crate::exec::ShellCommandExecutor;
use crate::fs::{FileSystem, RealFileSystem};
use crate::upload::LocalDirUploader;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings loading
/// - payload reading
/// - the shell executor and local-directory uploader
/// - Ctrl-C handling (sets the cancel flag's shutdown state)
///
/// Returns the process exit code.
pub async fn run(args: CliArgs) -> Result<i32> {
    let settings = config::load_or_default(args.settings.as_deref())?;
    let summary_capacity = settings.output.summary_capacity;

    let raw = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("reading payload {}", args.payload.display()))?;
    let properties: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing payload {} as JSON", args.payload.display()))?;

    let invocation_id = args
        .invocation_id
        .clone()
        .unwrap_or_else(|| Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string());

    // Scripts run from the document's working directory, so their paths
    // must not depend on the agent's cwd.
    let orchestration_dir = std::path::absolute(args.orchestration_dir.join(&invocation_id))
        .with_context(|| format!("resolving {}", args.orchestration_dir.display()))?;

    let config = Configuration {
        properties,
        output_bucket: args.bucket.clone(),
        output_key_prefix: args.key_prefix.clone(),
        orchestration_dir,
        invocation_id,
        plugin_id: args.plugin_id.clone(),
    };

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let uploader = Arc::new(LocalDirUploader::new(
        Arc::clone(&fs),
        args.store_root.clone(),
        &settings,
    ));
    let plugin = RunScriptPlugin::new(settings, ShellCommandExecutor::new(), uploader, fs);

    // Ctrl-C → stop before the next document.
    let cancel = Arc::new(TaskCancelFlag::new());
    {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            info!("Ctrl+C received; remaining documents will be skipped");
            cancel.shutdown();
        });
    }

    let result = plugin.execute(&config, cancel.as_ref()).await;
    plugin.drain_uploads().await;
    print_result(&result, args.json, summary_capacity)?;

    debug!(exit_code = result.exit_code(), "run complete");
    Ok(result.exit_code())
}

fn print_result(result: &PluginResult, json: bool, summary_capacity: usize) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{}", result.summary(summary_capacity));
    for failure in &result.upload_failures {
        eprintln!(
            "upload failed for {}: {}",
            failure.document_id, failure.message
        );
    }
    Ok(())
}
