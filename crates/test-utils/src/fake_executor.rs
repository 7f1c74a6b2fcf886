use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use runscript::cancel::CancelFlag;
use runscript::exec::{
    BoxFuture, CommandExecutor, CommandRequest, ExecutionError, ExecutionOutcome,
};

/// Build an outcome whose errors are plain messages.
pub fn outcome(stdout: &str, stderr: &str, exit_code: i32, errors: &[&str]) -> ExecutionOutcome {
    ExecutionOutcome {
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        exit_code,
        errors: errors
            .iter()
            .map(|e| ExecutionError::Other(e.to_string()))
            .collect(),
    }
}

/// A fake executor that:
/// - records every request it receives, in call order
/// - returns a scripted outcome per document directory (falling back to a
///   default outcome)
/// - optionally sleeps per document to simulate slow commands
///
/// Documents are keyed by the name of their output directory, which equals
/// the document id for ids without reserved characters.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    default: ExecutionOutcome,
    outcomes: HashMap<String, ExecutionOutcome>,
    delays: HashMap<String, Duration>,
    requests: Arc<Mutex<Vec<CommandRequest>>>,
}

impl FakeExecutor {
    pub fn new(default: ExecutionOutcome) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    pub fn with_outcome(mut self, document_dir: &str, outcome: ExecutionOutcome) -> Self {
        self.outcomes.insert(document_dir.to_string(), outcome);
        self
    }

    pub fn with_delay(mut self, document_dir: &str, delay: Duration) -> Self {
        self.delays.insert(document_dir.to_string(), delay);
        self
    }

    pub fn requests(&self) -> Vec<CommandRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn document_dir_name(request: &CommandRequest) -> String {
    request
        .stdout_path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl CommandExecutor for FakeExecutor {
    fn execute<'a>(
        &'a self,
        request: CommandRequest,
        _cancel: &'a dyn CancelFlag,
    ) -> BoxFuture<'a, ExecutionOutcome> {
        Box::pin(async move {
            let key = document_dir_name(&request);
            self.requests.lock().unwrap().push(request);

            if let Some(delay) = self.delays.get(&key) {
                tokio::time::sleep(*delay).await;
            }

            self.outcomes
                .get(&key)
                .cloned()
                .unwrap_or_else(|| self.default.clone())
        })
    }
}
