// src/upload/local.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use crate::config::PluginSettings;
use crate::document::sanitize_segment;
use crate::exec::BoxFuture;
use crate::fs::FileSystem;
use crate::upload::{OutputUploader, UploadRequest};

/// Uploader that copies output files into `<store_root>/<bucket>/<prefix>/<id>/`.
///
/// Only streams with non-empty text are copied, matching what a remote
/// upload would ship.
#[derive(Debug, Clone)]
pub struct LocalDirUploader {
    fs: Arc<dyn FileSystem>,
    store_root: PathBuf,
    stdout_file_name: String,
    stderr_file_name: String,
}

impl LocalDirUploader {
    pub fn new(fs: Arc<dyn FileSystem>, store_root: impl Into<PathBuf>, settings: &PluginSettings) -> Self {
        Self {
            fs,
            store_root: store_root.into(),
            stdout_file_name: settings.plugin.stdout_file_name.clone(),
            stderr_file_name: settings.plugin.stderr_file_name.clone(),
        }
    }

    /// Destination directory for `request`. Unusable key segments are
    /// dropped so nothing escapes the store root.
    pub fn destination_dir(&self, request: &UploadRequest) -> PathBuf {
        let mut dir = self.store_root.clone();
        let segments = std::iter::once(request.bucket.as_str())
            .chain(request.key_prefix.split('/'))
            .chain(std::iter::once(request.id.as_str()));
        for segment in segments.filter_map(sanitize_segment) {
            dir.push(segment);
        }
        dir
    }

    fn copy_file(&self, request: &UploadRequest, file_name: &str) -> anyhow::Result<()> {
        let source = request.local_dir.join(file_name);
        let target = self
            .destination_dir(request)
            .join(format!("{file_name}{}", request.extra_suffix));

        debug!(source = %source.display(), target = %target.display(), "uploading output file");

        let bytes = self.fs.read(&source)?;
        self.fs
            .write(&target, &bytes)
            .with_context(|| format!("uploading {} to {}", source.display(), target.display()))
    }
}

impl OutputUploader for LocalDirUploader {
    fn upload_output<'a>(&'a self, request: UploadRequest) -> BoxFuture<'a, Vec<anyhow::Error>> {
        Box::pin(async move {
            let mut errors = Vec::new();
            for (file_name, text) in [
                (&self.stdout_file_name, &request.stdout),
                (&self.stderr_file_name, &request.stderr),
            ] {
                if text.is_empty() {
                    continue;
                }
                if let Err(err) = self.copy_file(&request, file_name) {
                    errors.push(err);
                }
            }
            errors
        })
    }
}
