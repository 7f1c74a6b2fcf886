// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] defines the `CommandExecutor` capability and the raw
//!   [`ExecutionOutcome`] it produces.
//! - [`shell`] is the production capability built on `tokio::process`.
//! - [`document`] runs one document through a capability: script file,
//!   output paths, timeout resolution.

pub mod backend;
pub mod document;
pub mod shell;

pub use backend::{
    BoxFuture, CommandExecutor, CommandRequest, ExecutionError, ExecutionOutcome,
};
pub use document::{DocumentExecutor, OrchestrationPaths};
pub use shell::ShellCommandExecutor;
