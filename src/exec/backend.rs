// src/exec/backend.rs

//! Pluggable process-execution capability.
//!
//! The document executor talks to a `CommandExecutor` instead of spawning
//! processes itself. This makes it easy to swap in a fake executor in tests
//! while keeping the production implementation in [`shell`](super::shell).

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use crate::cancel::CancelFlag;

/// Boxed, sendable future returned by the capability traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Everything the capability needs to run one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    /// Final argument handed to the shell (the script path).
    pub command_line: String,
    /// Empty means "inherit the agent's cwd".
    pub working_dir: String,
    pub stdout_path: PathBuf,
    pub stderr_path: PathBuf,
    pub timeout: Duration,
    pub shell_command: String,
    pub shell_args: Vec<String>,
}

/// Execution-layer failure, distinct from whatever the process wrote to
/// stderr.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("{0}")]
    Spawn(String),

    /// Carries the configured limit; shown as e.g. `300ms` or `3600s`.
    #[error("command timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

/// Raw result of running one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub errors: Vec<ExecutionError>,
}

impl ExecutionOutcome {
    /// Outcome for a document whose process never ran.
    pub fn from_error(error: ExecutionError) -> Self {
        Self {
            exit_code: -1,
            errors: vec![error],
            ..Self::default()
        }
    }
}

/// Trait abstracting how a document's command line is executed.
///
/// Implementations must not fail: every problem is reported through
/// [`ExecutionOutcome::errors`].
pub trait CommandExecutor: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: CommandRequest,
        cancel: &'a dyn CancelFlag,
    ) -> BoxFuture<'a, ExecutionOutcome>;
}
