// src/output/mod.rs

//! Caller-visible output.
//!
//! - [`compose`] turns a raw [`ExecutionOutcome`](crate::exec::ExecutionOutcome)
//!   into a [`PluginOutput`]: truncation, error merging, status.
//! - [`summary`] renders an output as one bounded text block for display.

pub mod compose;
pub mod summary;

use serde::Serialize;

use crate::types::ResultStatus;

pub use compose::{ERROR_PREFIX, OutputLimits, compose, merge_errors, truncate};
pub use summary::{MIN_SUMMARY_CAPACITY, render_summary};

/// Composed output for one document or for a whole invocation.
///
/// `status == Success` iff `exit_code == 0`; the constructors keep the two
/// coupled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub status: ResultStatus,
}

impl PluginOutput {
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: 0,
            status: ResultStatus::Success,
        }
    }

    /// A failed output. A zero `exit_code` is replaced by 1.
    pub fn failed(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: if exit_code == 0 { 1 } else { exit_code },
            status: ResultStatus::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }

    /// Stdout and stderr as one block of at most `capacity` characters.
    pub fn summary(&self, capacity: usize) -> String {
        render_summary(&self.stdout, &self.stderr, capacity)
    }
}
