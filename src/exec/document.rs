// src/exec/document.rs

//! Runs one document through the injected [`CommandExecutor`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::cancel::CancelFlag;
use crate::config::PluginSettings;
use crate::document::{Document, directory_segment};
use crate::exec::backend::{CommandExecutor, CommandRequest, ExecutionError, ExecutionOutcome};
use crate::fs::FileSystem;

/// Filesystem locations derived for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationPaths {
    /// `orchestration_dir/<id>`; root of everything the document writes.
    pub document_dir: PathBuf,
    pub stdout_path: PathBuf,
    pub stderr_path: PathBuf,
    pub script_path: PathBuf,
}

impl OrchestrationPaths {
    /// Derive paths for the document with resolved id `document_id`.
    ///
    /// An id that sanitizes to nothing falls back to the plugin id, and to a
    /// fixed name if that is unusable too.
    pub fn new(
        orchestration_dir: &Path,
        document_id: &str,
        plugin_id: &str,
        settings: &PluginSettings,
    ) -> Self {
        let document_dir = orchestration_dir.join(directory_segment(document_id, plugin_id));
        let p = &settings.plugin;
        Self {
            stdout_path: document_dir.join(&p.stdout_file_name),
            stderr_path: document_dir.join(&p.stderr_file_name),
            script_path: document_dir.join(&p.script_name),
            document_dir,
        }
    }
}

/// Document executor: writes the script, then hands it to the capability.
///
/// Never fails; every problem ends up in [`ExecutionOutcome::errors`].
pub struct DocumentExecutor<E> {
    executor: E,
    fs: Arc<dyn FileSystem>,
    settings: Arc<PluginSettings>,
}

impl<E: CommandExecutor> DocumentExecutor<E> {
    pub fn new(executor: E, fs: Arc<dyn FileSystem>, settings: Arc<PluginSettings>) -> Self {
        Self {
            executor,
            fs,
            settings,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Build the capability request for `doc`.
    pub fn request_for(&self, doc: &Document, paths: &OrchestrationPaths) -> CommandRequest {
        let p = &self.settings.plugin;
        CommandRequest {
            command_line: paths.script_path.to_string_lossy().into_owned(),
            working_dir: doc.working_directory.clone(),
            stdout_path: paths.stdout_path.clone(),
            stderr_path: paths.stderr_path.clone(),
            timeout: self.settings.resolve_timeout(&doc.timeout_seconds),
            shell_command: p.shell_command.clone(),
            shell_args: p.shell_args.clone(),
        }
    }

    pub async fn execute(
        &self,
        doc: &Document,
        paths: &OrchestrationPaths,
        cancel: &dyn CancelFlag,
    ) -> ExecutionOutcome {
        if let Err(err) = self
            .fs
            .write(&paths.script_path, doc.script_body().as_bytes())
        {
            warn!(
                document = %doc.id,
                script = %paths.script_path.display(),
                error = %err,
                "could not write script file"
            );
            return ExecutionOutcome::from_error(ExecutionError::Io(format!(
                "writing script {}: {err:#}",
                paths.script_path.display()
            )));
        }

        let request = self.request_for(doc, paths);
        info!(
            document = %doc.id,
            commands = doc.commands.len(),
            timeout_secs = request.timeout.as_secs(),
            "executing document"
        );

        let outcome = self.executor.execute(request, cancel).await;

        info!(
            document = %doc.id,
            exit_code = outcome.exit_code,
            errors = outcome.errors.len(),
            "document execution finished"
        );
        outcome
    }
}
