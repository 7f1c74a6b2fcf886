// src/upload/mod.rs

//! Shipping captured output to remote storage.
//!
//! - [`OutputUploader`] is the injected storage capability.
//! - [`local`] provides `LocalDirUploader`, which treats a directory tree as
//!   the object store.
//! - [`coordinator`] decides when and how to call the capability for each
//!   document and turns its errors into diagnostics.
//!
//! Upload results never feed back into a document's composed output.

pub mod coordinator;
pub mod local;

use std::path::PathBuf;

use serde::Serialize;

use crate::exec::BoxFuture;

pub use coordinator::UploadCoordinator;
pub use local::LocalDirUploader;

/// Arguments for one upload call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Remote key segment: the document id, or the plugin id when empty.
    pub id: String,
    /// Directory holding the document's output files.
    pub local_dir: PathBuf,
    pub bucket: String,
    pub key_prefix: String,
    pub is_last_upload: bool,
    /// Appended to each uploaded file name.
    pub extra_suffix: String,
    pub stdout: String,
    pub stderr: String,
}

/// Upload failure recorded for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFailure {
    pub document_id: String,
    pub message: String,
}

/// Object-storage capability.
///
/// Returns every error encountered; an empty list means success.
pub trait OutputUploader: Send + Sync {
    fn upload_output<'a>(&'a self, request: UploadRequest) -> BoxFuture<'a, Vec<anyhow::Error>>;
}
