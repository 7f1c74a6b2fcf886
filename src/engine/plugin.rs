// src/engine/plugin.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::cancel::{self, CancelFlag};
use crate::config::PluginSettings;
use crate::document::{Document, normalize};
use crate::engine::{Configuration, DocumentResult, Phase, PluginResult, fold};
use crate::exec::{CommandExecutor, DocumentExecutor, OrchestrationPaths};
use crate::fs::FileSystem;
use crate::output::{PluginOutput, compose};
use crate::upload::{OutputUploader, UploadCoordinator, UploadFailure};

/// Public entry point: runs every document of an invocation in order and
/// folds the results.
///
/// Process execution and uploading are delegated to the injected
/// capabilities; the plugin itself holds no per-invocation state, so one
/// instance can serve any number of sequential invocations.
pub struct RunScriptPlugin<E, U> {
    settings: Arc<PluginSettings>,
    executor: DocumentExecutor<E>,
    uploads: UploadCoordinator<U>,
}

impl<E, U> RunScriptPlugin<E, U>
where
    E: CommandExecutor,
    U: OutputUploader + 'static,
{
    pub fn new(
        settings: PluginSettings,
        executor: E,
        uploader: Arc<U>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        let settings = Arc::new(settings);
        let mode = settings.upload.mode;
        Self {
            executor: DocumentExecutor::new(executor, fs, Arc::clone(&settings)),
            uploads: UploadCoordinator::new(uploader, mode),
            settings,
        }
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    pub fn command_executor(&self) -> &E {
        self.executor.executor()
    }

    pub fn uploader(&self) -> &Arc<U> {
        self.uploads.uploader()
    }

    /// Wait for the background uploads started in async upload mode.
    pub async fn drain_uploads(&self) {
        self.uploads.drain().await;
    }

    /// Run a whole invocation. Never fails: every error ends up in the
    /// returned result.
    pub async fn execute(&self, config: &Configuration, cancel: &dyn CancelFlag) -> PluginResult {
        let start_time = Utc::now();
        let invocation = config.invocation_id.as_str();
        info!(
            invocation = %invocation,
            plugin = %config.plugin_id,
            "starting plugin invocation"
        );

        log_phase(invocation, Phase::NotStarted);
        log_phase(invocation, Phase::Normalizing);

        let documents = match normalize(&config.properties, &config.plugin_id) {
            Ok(docs) => docs,
            Err(err) => {
                error!(invocation = %invocation, error = %err, "plugin input rejected");
                log_phase(invocation, Phase::Done);
                return PluginResult {
                    plugin_id: config.plugin_id.clone(),
                    output: PluginOutput::failed("", err.to_string(), 1),
                    documents: Vec::new(),
                    upload_failures: Vec::new(),
                    cancel_reason: None,
                    start_time,
                    end_time: Utc::now(),
                };
            }
        };

        let mut results = Vec::with_capacity(documents.len());
        let mut upload_failures = Vec::new();
        let mut cancel_reason = None;

        for (index, doc) in documents.iter().enumerate() {
            let id = doc.resolved_id(&config.plugin_id);

            if cancel_reason.is_none() {
                cancel_reason = cancel::poll(cancel);
            }
            if let Some(reason) = cancel_reason {
                warn!(
                    invocation = %invocation,
                    document = %id,
                    ?reason,
                    "skipping document after cancellation"
                );
                results.push(DocumentResult::skipped(id, reason));
                continue;
            }

            let (result, failures) = self.run_document(index, doc, config, cancel).await;
            results.push(result);
            upload_failures.extend(failures);
        }

        let output = fold(&results);
        log_phase(invocation, Phase::Folded);

        let end_time = Utc::now();
        info!(
            invocation = %invocation,
            status = %output.status,
            exit_code = output.exit_code,
            documents = results.len(),
            upload_failures = upload_failures.len(),
            "plugin invocation finished"
        );
        log_phase(invocation, Phase::Done);

        PluginResult {
            plugin_id: config.plugin_id.clone(),
            output,
            documents: results,
            upload_failures,
            cancel_reason,
            start_time,
            end_time,
        }
    }

    /// Execute, compose and upload a single document.
    ///
    /// `index` is the document's position in the invocation and is only used
    /// for logging.
    pub async fn run_document(
        &self,
        index: usize,
        doc: &Document,
        config: &Configuration,
        cancel: &dyn CancelFlag,
    ) -> (DocumentResult, Vec<UploadFailure>) {
        let invocation = config.invocation_id.as_str();
        let id = doc.resolved_id(&config.plugin_id);
        let paths =
            OrchestrationPaths::new(&config.orchestration_dir, id, &config.plugin_id, &self.settings);

        log_phase(invocation, Phase::Running(index));
        let outcome = self.executor.execute(doc, &paths, cancel).await;

        log_phase(invocation, Phase::Composing(index));
        let output = compose(&outcome, &self.settings.output_limits());

        log_phase(invocation, Phase::Uploading(index));
        let failures = self
            .uploads
            .upload(
                id,
                &paths.document_dir,
                &config.output_bucket,
                &config.output_key_prefix,
                &output,
            )
            .await;

        (DocumentResult::executed(id, output), failures)
    }
}

fn log_phase(invocation: &str, phase: Phase) {
    debug!(invocation = %invocation, ?phase, "orchestrator phase");
}
