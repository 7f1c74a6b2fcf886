use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Caller-visible status of a document or of a whole invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Success,
    Failed,
}

impl ResultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatus::Success => "Success",
            ResultStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How output uploads are scheduled relative to the document pipeline.
///
/// - `Sync`: the orchestrator awaits the upload before moving on to the next
///   document (default).
/// - `Async`: the upload is spawned in the background and never awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    Sync,
    Async,
}

impl Default for UploadMode {
    fn default() -> Self {
        UploadMode::Sync
    }
}

impl FromStr for UploadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sync" => Ok(UploadMode::Sync),
            "async" => Ok(UploadMode::Async),
            other => Err(format!(
                "invalid upload mode: {other} (expected \"sync\" or \"async\")"
            )),
        }
    }
}

/// Which cancel-flag signal caused documents to be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelReason {
    Canceled,
    ShutDown,
}

impl CancelReason {
    pub fn skip_message(&self) -> &'static str {
        match self {
            CancelReason::Canceled => "execution skipped: invocation was canceled",
            CancelReason::ShutDown => "execution skipped: agent is shutting down",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_mode_parses_case_insensitively() {
        assert_eq!("ASYNC".parse::<UploadMode>(), Ok(UploadMode::Async));
        assert_eq!(" sync ".parse::<UploadMode>(), Ok(UploadMode::Sync));
        assert!("later".parse::<UploadMode>().is_err());
    }

    #[test]
    fn status_displays_agent_spelling() {
        assert_eq!(ResultStatus::Failed.to_string(), "Failed");
        assert_eq!(ResultStatus::Success.as_str(), "Success");
    }
}
