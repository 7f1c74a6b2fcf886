// src/output/compose.rs

//! Output composition: truncation, error merging and status derivation.

use crate::exec::ExecutionOutcome;
use crate::output::PluginOutput;

/// Prefix put in front of every execution-layer error merged into stderr.
pub const ERROR_PREFIX: &str = "failed to run commands: ";

/// Per-stream length limits, counted in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLimits {
    pub max_stdout_len: usize,
    pub max_stderr_len: usize,
    pub truncation_suffix: String,
}

/// Cut `text` to at most `max` characters, ending with `suffix` when cut.
///
/// Text that already fits is returned unchanged, which makes this
/// idempotent for any `max` at least as long as the suffix.
pub fn truncate(text: &str, max: usize, suffix: &str) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let keep = max.saturating_sub(suffix.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

/// Merge execution errors into the stderr text, in the order they occurred.
pub fn merge_errors<E: ToString>(errors: &[E], stderr: &str) -> String {
    if errors.is_empty() {
        return stderr.to_string();
    }

    let mut merged = errors
        .iter()
        .map(|e| format!("{ERROR_PREFIX}{}", e.to_string()))
        .collect::<Vec<_>>()
        .join("\n");
    merged.push('\n');
    merged.push_str(stderr);
    merged
}

/// Compose the caller-visible output for one document.
///
/// Success requires both an empty error list and a zero process exit code.
pub fn compose(outcome: &ExecutionOutcome, limits: &OutputLimits) -> PluginOutput {
    let stdout = truncate(
        &outcome.stdout,
        limits.max_stdout_len,
        &limits.truncation_suffix,
    );
    let merged = merge_errors(&outcome.errors, &outcome.stderr);
    let stderr = truncate(&merged, limits.max_stderr_len, &limits.truncation_suffix);

    if outcome.errors.is_empty() && outcome.exit_code == 0 {
        PluginOutput::success(stdout, stderr)
    } else {
        let code = if outcome.exit_code != 0 {
            outcome.exit_code
        } else {
            1
        };
        PluginOutput::failed(stdout, stderr, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::ExecutionError;
    use crate::types::ResultStatus;

    fn limits(max: usize) -> OutputLimits {
        OutputLimits {
            max_stdout_len: max,
            max_stderr_len: max,
            truncation_suffix: "-more-".to_string(),
        }
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("hello", 5, "-more-"), "hello");
        assert_eq!(truncate("", 0, "-more-"), "");
    }

    #[test]
    fn truncate_appends_suffix() {
        assert_eq!(truncate("0123456789abcdef", 10, "-more-"), "0123-more-");
    }

    #[test]
    fn truncate_never_goes_below_zero() {
        assert_eq!(truncate("0123456789", 3, "-more-"), "-more-");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("héllo wörld", 8, ".."), "héllo ..");
    }

    #[test]
    fn merge_errors_orders_errors_before_stderr() {
        let merged = merge_errors(&["e1", "e2"], "X");
        assert_eq!(
            merged,
            "failed to run commands: e1\nfailed to run commands: e2\nX"
        );
        assert_eq!(merge_errors::<&str>(&[], "X"), "X");
    }

    #[test]
    fn compose_success_requires_no_errors_and_zero_exit() {
        let outcome = ExecutionOutcome {
            stdout: "out".to_string(),
            stderr: "err".to_string(),
            exit_code: 0,
            errors: vec![],
        };
        let out = compose(&outcome, &limits(1000));
        assert_eq!(out.status, ResultStatus::Success);
        assert_eq!(out.exit_code, 0);
        assert_eq!(out.stdout, "out");
        assert_eq!(out.stderr, "err");
    }

    #[test]
    fn compose_zero_exit_does_not_mask_errors() {
        let outcome = ExecutionOutcome {
            stdout: String::new(),
            stderr: "err".to_string(),
            exit_code: 0,
            errors: vec![ExecutionError::Other("boom".to_string())],
        };
        let out = compose(&outcome, &limits(1000));
        assert_eq!(out.status, ResultStatus::Failed);
        assert_eq!(out.exit_code, 1);
        assert_eq!(out.stderr, "failed to run commands: boom\nerr");
    }

    #[test]
    fn compose_keeps_process_exit_code() {
        let outcome = ExecutionOutcome {
            exit_code: 3,
            ..ExecutionOutcome::default()
        };
        let out = compose(&outcome, &limits(1000));
        assert_eq!(out.status, ResultStatus::Failed);
        assert_eq!(out.exit_code, 3);
    }

    #[test]
    fn compose_truncates_merged_stderr() {
        let outcome = ExecutionOutcome {
            stderr: "tail".to_string(),
            exit_code: 1,
            errors: vec![ExecutionError::Other("e".to_string())],
            ..ExecutionOutcome::default()
        };
        let out = compose(&outcome, &limits(16));
        assert_eq!(out.stderr, "failed to -more-");
        assert_eq!(out.stderr.chars().count(), 16);
    }
}
