// src/exec/shell.rs

//! Real process executor backed by `tokio::process::Command`.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::cancel::CancelFlag;
use crate::exec::backend::{
    BoxFuture, CommandExecutor, CommandRequest, ExecutionError, ExecutionOutcome,
};

/// Production executor: runs `<shell> <args..> <command_line>` with stdout
/// and stderr streamed straight into the requested files.
///
/// The cancel flag is not consulted; a started process runs until it exits
/// or hits its timeout.
#[derive(Debug, Clone, Default)]
pub struct ShellCommandExecutor;

impl ShellCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ShellCommandExecutor {
    fn execute<'a>(
        &'a self,
        request: CommandRequest,
        _cancel: &'a dyn CancelFlag,
    ) -> BoxFuture<'a, ExecutionOutcome> {
        Box::pin(run_command(request))
    }
}

enum ProcessExit {
    Exited(i32),
    TimedOut,
}

/// Run one command request to completion and collect its output files.
pub async fn run_command(request: CommandRequest) -> ExecutionOutcome {
    let mut errors = Vec::new();

    let exit_code = match spawn_and_wait(&request).await {
        Ok(ProcessExit::Exited(code)) => code,
        Ok(ProcessExit::TimedOut) => {
            errors.push(ExecutionError::Timeout(request.timeout));
            -1
        }
        Err(err) => {
            error!(
                command = %request.command_line,
                error = %err,
                "command execution error"
            );
            errors.push(err);
            -1
        }
    };

    let stdout = read_output(&request.stdout_path, &mut errors).await;
    let stderr = read_output(&request.stderr_path, &mut errors).await;

    ExecutionOutcome {
        stdout,
        stderr,
        exit_code,
        errors,
    }
}

async fn spawn_and_wait(request: &CommandRequest) -> Result<ProcessExit, ExecutionError> {
    for path in [&request.stdout_path, &request.stderr_path] {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ExecutionError::Io(format!("creating directory {}: {e}", parent.display()))
            })?;
        }
    }

    let stdout_file = create_output_file(&request.stdout_path)?;
    let stderr_file = create_output_file(&request.stderr_path)?;

    let mut cmd = Command::new(&request.shell_command);
    cmd.args(&request.shell_args)
        .arg(&request.command_line)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_file))
        .stderr(Stdio::from(stderr_file))
        .kill_on_drop(true);

    if !request.working_dir.is_empty() {
        cmd.current_dir(&request.working_dir);
    }

    info!(
        shell = %request.shell_command,
        command = %request.command_line,
        working_dir = %request.working_dir,
        timeout_secs = request.timeout.as_secs(),
        "starting process"
    );

    let mut child = cmd.spawn().map_err(|e| {
        ExecutionError::Spawn(format!(
            "spawning '{}' for {}: {e}",
            request.shell_command, request.command_line
        ))
    })?;

    match tokio::time::timeout(request.timeout, child.wait()).await {
        Ok(Ok(status)) => {
            let code = status.code().unwrap_or(-1);
            info!(exit_code = code, success = status.success(), "process exited");
            Ok(ProcessExit::Exited(code))
        }
        Ok(Err(e)) => Err(ExecutionError::Io(format!("waiting for process: {e}"))),
        Err(_elapsed) => {
            warn!(
                timeout_secs = request.timeout.as_secs(),
                "process timed out; killing"
            );
            if let Err(e) = child.kill().await {
                warn!(error = %e, "failed to kill timed-out process");
            }
            Ok(ProcessExit::TimedOut)
        }
    }
}

fn create_output_file(path: &Path) -> Result<File, ExecutionError> {
    File::create(path)
        .map_err(|e| ExecutionError::Io(format!("creating output file {}: {e}", path.display())))
}

async fn read_output(path: &Path, errors: &mut Vec<ExecutionError>) -> String {
    match tokio::fs::read(path).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "output file not present");
            String::new()
        }
        Err(e) => {
            errors.push(ExecutionError::Io(format!(
                "reading output file {}: {e}",
                path.display()
            )));
            String::new()
        }
    }
}
