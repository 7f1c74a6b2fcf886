// src/output/summary.rs

use crate::output::truncate;

pub const ERROR_HEADER: &str = "\n----------ERROR-------\n";
pub const OUTPUT_TRUNCATED: &str = "---Output truncated---";
pub const ERROR_TRUNCATED: &str = "---Error truncated----";

/// Smallest capacity that still fits the header and both truncation markers.
pub const MIN_SUMMARY_CAPACITY: usize =
    ERROR_HEADER.len() + OUTPUT_TRUNCATED.len() + ERROR_TRUNCATED.len();

/// Render stdout followed by an error block (only when stderr is non-empty),
/// bounded to `capacity` characters for any `capacity` of at least
/// [`MIN_SUMMARY_CAPACITY`].
///
/// When both streams do not fit, each gets at least half of the budget left
/// after the header; a stream shorter than its half donates the rest.
pub fn render_summary(stdout: &str, stderr: &str, capacity: usize) -> String {
    let header = if stderr.is_empty() { "" } else { ERROR_HEADER };
    let out_len = stdout.chars().count();
    let err_len = stderr.chars().count();

    if out_len + header.chars().count() + err_len <= capacity {
        return format!("{stdout}{header}{stderr}");
    }

    let budget = capacity.saturating_sub(header.chars().count());
    let half = budget / 2;
    let (out_budget, err_budget) = if out_len <= half {
        (out_len, budget - out_len)
    } else if err_len <= half {
        (budget - err_len, err_len)
    } else {
        (budget - half, half)
    };

    let out_part = truncate(stdout, out_budget, OUTPUT_TRUNCATED);
    if stderr.is_empty() {
        return out_part;
    }
    let err_part = truncate(stderr, err_budget, ERROR_TRUNCATED);
    format!("{out_part}{header}{err_part}")
}
