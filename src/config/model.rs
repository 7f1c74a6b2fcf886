// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::output::OutputLimits;
use crate::types::UploadMode;

/// Plugin settings as read from a TOML file.
///
/// ```toml
/// [plugin]
/// name = "aws:runShellScript"
/// stdout_file_name = "stdout"
/// stderr_file_name = "stderr"
///
/// [output]
/// max_stdout_length = 2500
/// truncation_suffix = "--output truncated--"
///
/// [upload]
/// mode = "sync"
///
/// [timeout]
/// default_seconds = 3600
/// ```
///
/// All sections are optional and have reasonable defaults. This type is only
/// a deserialization target; use [`PluginSettings`] (via `TryFrom`) for the
/// validated form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPluginSettings {
    #[serde(default)]
    pub plugin: PluginSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub upload: UploadSection,

    #[serde(default)]
    pub timeout: TimeoutSection,
}

/// Validated plugin settings shared by every invocation of a plugin
/// instance.
#[derive(Debug, Clone)]
pub struct PluginSettings {
    pub plugin: PluginSection,
    pub output: OutputSection,
    pub upload: UploadSection,
    pub timeout: TimeoutSection,
}

impl PluginSettings {
    /// Build settings without running validation. Callers outside this
    /// module go through `TryFrom<RawPluginSettings>`.
    pub(crate) fn new_unchecked(raw: RawPluginSettings) -> Self {
        Self {
            plugin: raw.plugin,
            output: raw.output,
            upload: raw.upload,
            timeout: raw.timeout,
        }
    }

    pub fn output_limits(&self) -> OutputLimits {
        OutputLimits {
            max_stdout_len: self.output.max_stdout_length,
            max_stderr_len: self.output.max_stderr_length,
            truncation_suffix: self.output.truncation_suffix.clone(),
        }
    }

    /// Turn a document's `TimeoutSeconds` into a duration.
    ///
    /// Unparsable or out-of-range values fall back to the default timeout.
    pub fn resolve_timeout(&self, raw: &str) -> Duration {
        let t = &self.timeout;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Duration::from_secs(t.default_seconds);
        }

        match trimmed.parse::<u64>() {
            Ok(secs) if (t.min_seconds..=t.max_seconds).contains(&secs) => {
                Duration::from_secs(secs)
            }
            Ok(secs) => {
                warn!(
                    timeout = secs,
                    min = t.min_seconds,
                    max = t.max_seconds,
                    default = t.default_seconds,
                    "timeout out of range; using default"
                );
                Duration::from_secs(t.default_seconds)
            }
            Err(_) => {
                warn!(
                    timeout = %trimmed,
                    default = t.default_seconds,
                    "timeout is not a non-negative integer; using default"
                );
                Duration::from_secs(t.default_seconds)
            }
        }
    }
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self::new_unchecked(RawPluginSettings::default())
    }
}

/// `[plugin]` section: identity, file naming and shell selection.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginSection {
    #[serde(default = "default_plugin_name")]
    pub name: String,

    #[serde(default = "default_stdout_file_name")]
    pub stdout_file_name: String,

    #[serde(default = "default_stderr_file_name")]
    pub stderr_file_name: String,

    /// File the document's commands are written to before execution.
    #[serde(default = "default_script_name")]
    pub script_name: String,

    #[serde(default = "default_shell_command")]
    pub shell_command: String,

    /// Arguments placed between the shell and the script path.
    #[serde(default = "default_shell_args")]
    pub shell_args: Vec<String>,
}

fn default_plugin_name() -> String {
    "aws:runShellScript".to_string()
}

fn default_stdout_file_name() -> String {
    "stdout".to_string()
}

fn default_stderr_file_name() -> String {
    "stderr".to_string()
}

fn default_script_name() -> String {
    if cfg!(windows) {
        "_script.bat".to_string()
    } else {
        "_script.sh".to_string()
    }
}

fn default_shell_command() -> String {
    if cfg!(windows) {
        "cmd".to_string()
    } else {
        "sh".to_string()
    }
}

fn default_shell_args() -> Vec<String> {
    if cfg!(windows) {
        vec!["/C".to_string()]
    } else {
        Vec::new()
    }
}

impl Default for PluginSection {
    fn default() -> Self {
        Self {
            name: default_plugin_name(),
            stdout_file_name: default_stdout_file_name(),
            stderr_file_name: default_stderr_file_name(),
            script_name: default_script_name(),
            shell_command: default_shell_command(),
            shell_args: default_shell_args(),
        }
    }
}

/// `[output]` section: truncation limits.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_max_output_length")]
    pub max_stdout_length: usize,

    #[serde(default = "default_max_output_length")]
    pub max_stderr_length: usize,

    #[serde(default = "default_truncation_suffix")]
    pub truncation_suffix: String,

    /// Upper bound on the rendered invocation summary.
    #[serde(default = "default_summary_capacity")]
    pub summary_capacity: usize,
}

fn default_max_output_length() -> usize {
    2500
}

fn default_truncation_suffix() -> String {
    "--output truncated--".to_string()
}

fn default_summary_capacity() -> usize {
    2500
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            max_stdout_length: default_max_output_length(),
            max_stderr_length: default_max_output_length(),
            truncation_suffix: default_truncation_suffix(),
            summary_capacity: default_summary_capacity(),
        }
    }
}

/// `[upload]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadSection {
    #[serde(default)]
    pub mode: UploadMode,
}

/// `[timeout]` section (all values in seconds).
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutSection {
    #[serde(default = "default_timeout_seconds")]
    pub default_seconds: u64,

    #[serde(default = "default_min_timeout_seconds")]
    pub min_seconds: u64,

    #[serde(default = "default_max_timeout_seconds")]
    pub max_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    3600
}

fn default_min_timeout_seconds() -> u64 {
    5
}

fn default_max_timeout_seconds() -> u64 {
    172_800
}

impl Default for TimeoutSection {
    fn default() -> Self {
        Self {
            default_seconds: default_timeout_seconds(),
            min_seconds: default_min_timeout_seconds(),
            max_seconds: default_max_timeout_seconds(),
        }
    }
}
