// src/engine/mod.rs

//! Orchestration engine.
//!
//! This module ties together:
//! - input normalization
//! - per-document execution, composition and upload
//! - folding per-document outputs into one invocation result
//!
//! The pure fold lives in [`fold`]; the async pipeline driving the
//! capabilities is implemented in [`plugin`].

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::output::PluginOutput;
use crate::types::{CancelReason, ResultStatus};
use crate::upload::UploadFailure;

pub mod fold;
pub mod plugin;

pub use fold::{fold, section_header};
pub use plugin::RunScriptPlugin;

/// Per-invocation configuration handed over by the agent.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Raw plugin properties: one document or an ordered list of documents.
    pub properties: Value,
    /// Output bucket; empty disables uploading.
    pub output_bucket: String,
    pub output_key_prefix: String,
    /// Root under which each document gets its own directory.
    pub orchestration_dir: PathBuf,
    /// Identifies this invocation in logs.
    pub invocation_id: String,
    /// Default id for documents that carry none.
    pub plugin_id: String,
}

/// Orchestrator state, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Normalizing,
    Running(usize),
    Composing(usize),
    Uploading(usize),
    Folded,
    Done,
}

/// Whether a document actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    Executed,
    Skipped(CancelReason),
}

/// Composed result for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentResult {
    /// Resolved id (plugin id when the document had none).
    pub document_id: String,
    pub output: PluginOutput,
    pub disposition: Disposition,
}

impl DocumentResult {
    pub fn executed(document_id: impl Into<String>, output: PluginOutput) -> Self {
        Self {
            document_id: document_id.into(),
            output,
            disposition: Disposition::Executed,
        }
    }

    /// Placeholder for a document not started because of cancellation.
    pub fn skipped(document_id: impl Into<String>, reason: CancelReason) -> Self {
        Self {
            document_id: document_id.into(),
            output: PluginOutput::failed("", reason.skip_message(), 1),
            disposition: Disposition::Skipped(reason),
        }
    }
}

/// Overall result of one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct PluginResult {
    pub plugin_id: String,
    /// Folded output across all documents.
    pub output: PluginOutput,
    /// Per-document results, in input order.
    pub documents: Vec<DocumentResult>,
    /// Upload diagnostics; never reflected in `output`.
    pub upload_failures: Vec<UploadFailure>,
    /// Set when cancellation caused documents to be skipped.
    pub cancel_reason: Option<CancelReason>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl PluginResult {
    pub fn status(&self) -> ResultStatus {
        self.output.status
    }

    pub fn exit_code(&self) -> i32 {
        self.output.exit_code
    }

    /// Folded output rendered as one bounded block.
    pub fn summary(&self, capacity: usize) -> String {
        self.output.summary(capacity)
    }
}
