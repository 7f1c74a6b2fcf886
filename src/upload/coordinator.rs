// src/upload/coordinator.rs

use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::output::PluginOutput;
use crate::types::UploadMode;
use crate::upload::{OutputUploader, UploadFailure, UploadRequest};

/// Calls the upload capability once per document, in sync or
/// fire-and-forget mode.
///
/// Background uploads are tracked so the owner can wait for them with
/// [`drain`](Self::drain) before the process exits.
pub struct UploadCoordinator<U> {
    uploader: Arc<U>,
    mode: UploadMode,
    pending: Mutex<JoinSet<()>>,
}

impl<U: OutputUploader + 'static> UploadCoordinator<U> {
    pub fn new(uploader: Arc<U>, mode: UploadMode) -> Self {
        Self {
            uploader,
            mode,
            pending: Mutex::new(JoinSet::new()),
        }
    }

    pub fn uploader(&self) -> &Arc<U> {
        &self.uploader
    }

    /// Upload one document's output.
    ///
    /// `document_id` must already be resolved (plugin id substituted for an
    /// empty document id). An empty bucket disables uploading. In async mode
    /// this returns immediately with no failures; errors are only logged.
    pub async fn upload(
        &self,
        document_id: &str,
        document_dir: &Path,
        bucket: &str,
        key_prefix: &str,
        output: &PluginOutput,
    ) -> Vec<UploadFailure> {
        if bucket.is_empty() {
            debug!(document = %document_id, "no output bucket configured; skipping upload");
            return Vec::new();
        }

        let request = UploadRequest {
            id: document_id.to_string(),
            local_dir: document_dir.to_path_buf(),
            bucket: bucket.to_string(),
            key_prefix: key_prefix.to_string(),
            is_last_upload: false,
            extra_suffix: String::new(),
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
        };

        match self.mode {
            UploadMode::Sync => {
                let errors = self.uploader.upload_output(request).await;
                to_failures(document_id, errors)
            }
            UploadMode::Async => {
                let uploader = Arc::clone(&self.uploader);
                let id = document_id.to_string();
                debug!(document = %id, "spawning background upload");
                self.pending_uploads().spawn(async move {
                    to_failures(&id, uploader.upload_output(request).await);
                });
                Vec::new()
            }
        }
    }
}

impl<U> UploadCoordinator<U> {
    fn pending_uploads(&self) -> std::sync::MutexGuard<'_, JoinSet<()>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Wait for every background upload started so far.
    pub async fn drain(&self) {
        let mut pending = std::mem::take(&mut *self.pending_uploads());
        if !pending.is_empty() {
            debug!(count = pending.len(), "waiting for background uploads");
        }
        while let Some(joined) = pending.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "background upload task did not complete");
            }
        }
    }
}

fn to_failures(document_id: &str, errors: Vec<anyhow::Error>) -> Vec<UploadFailure> {
    let failures: Vec<UploadFailure> = errors
        .into_iter()
        .map(|err| {
            let message = format!("{err:#}");
            warn!(document = %document_id, error = %message, "output upload failed");
            UploadFailure {
                document_id: document_id.to_string(),
                message,
            }
        })
        .collect();

    if failures.is_empty() {
        info!(document = %document_id, "output uploaded");
    }
    failures
}
