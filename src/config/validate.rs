// src/config/validate.rs

use crate::config::model::{PluginSettings, RawPluginSettings};
use crate::errors::{Result, RunScriptError};
use crate::output::MIN_SUMMARY_CAPACITY;

impl TryFrom<RawPluginSettings> for PluginSettings {
    type Error = crate::errors::RunScriptError;

    fn try_from(raw: RawPluginSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(PluginSettings::new_unchecked(raw))
    }
}

fn validate_raw_settings(raw: &RawPluginSettings) -> Result<()> {
    validate_file_names(raw)?;
    validate_shell(raw)?;
    validate_output(raw)?;
    validate_timeout(raw)?;
    Ok(())
}

fn validate_file_names(raw: &RawPluginSettings) -> Result<()> {
    let p = &raw.plugin;
    for (key, value) in [
        ("stdout_file_name", &p.stdout_file_name),
        ("stderr_file_name", &p.stderr_file_name),
        ("script_name", &p.script_name),
    ] {
        if value.trim().is_empty() {
            return Err(RunScriptError::ConfigError(format!(
                "[plugin].{key} must not be empty"
            )));
        }
        if value.contains('/') || value.contains('\\') {
            return Err(RunScriptError::ConfigError(format!(
                "[plugin].{key} must be a bare file name (got '{value}')"
            )));
        }
    }

    if p.stdout_file_name == p.stderr_file_name {
        return Err(RunScriptError::ConfigError(format!(
            "[plugin].stdout_file_name and stderr_file_name must differ (both '{}')",
            p.stdout_file_name
        )));
    }
    if p.script_name == p.stdout_file_name || p.script_name == p.stderr_file_name {
        return Err(RunScriptError::ConfigError(format!(
            "[plugin].script_name '{}' collides with an output file name",
            p.script_name
        )));
    }

    Ok(())
}

fn validate_shell(raw: &RawPluginSettings) -> Result<()> {
    if raw.plugin.shell_command.trim().is_empty() {
        return Err(RunScriptError::ConfigError(
            "[plugin].shell_command must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_output(raw: &RawPluginSettings) -> Result<()> {
    let o = &raw.output;
    let suffix_len = o.truncation_suffix.chars().count();

    for (key, value) in [
        ("max_stdout_length", o.max_stdout_length),
        ("max_stderr_length", o.max_stderr_length),
    ] {
        if value <= suffix_len {
            return Err(RunScriptError::ConfigError(format!(
                "[output].{key} must be greater than the truncation suffix length ({suffix_len}), got {value}"
            )));
        }
    }

    if o.summary_capacity < MIN_SUMMARY_CAPACITY {
        return Err(RunScriptError::ConfigError(format!(
            "[output].summary_capacity must be >= {MIN_SUMMARY_CAPACITY}, got {}",
            o.summary_capacity
        )));
    }

    Ok(())
}

fn validate_timeout(raw: &RawPluginSettings) -> Result<()> {
    let t = &raw.timeout;
    if !(t.min_seconds <= t.default_seconds && t.default_seconds <= t.max_seconds) {
        return Err(RunScriptError::ConfigError(format!(
            "[timeout] requires min_seconds <= default_seconds <= max_seconds (got {} / {} / {})",
            t.min_seconds, t.default_seconds, t.max_seconds
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PluginSettings::try_from(RawPluginSettings::default()).is_ok());
    }

    #[test]
    fn rejects_identical_output_file_names() {
        let mut raw = RawPluginSettings::default();
        raw.plugin.stderr_file_name = raw.plugin.stdout_file_name.clone();

        match PluginSettings::try_from(raw) {
            Err(RunScriptError::ConfigError(msg)) => assert!(msg.contains("must differ")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_limit_not_larger_than_suffix() {
        let mut raw = RawPluginSettings::default();
        raw.output.truncation_suffix = "-more-".to_string();
        raw.output.max_stderr_length = 6;

        match PluginSettings::try_from(raw) {
            Err(RunScriptError::ConfigError(msg)) => assert!(msg.contains("max_stderr_length")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_default_timeout_outside_bounds() {
        let mut raw = RawPluginSettings::default();
        raw.timeout.default_seconds = 1;

        assert!(matches!(
            PluginSettings::try_from(raw),
            Err(RunScriptError::ConfigError(_))
        ));
    }

    #[test]
    fn rejects_path_in_script_name() {
        let mut raw = RawPluginSettings::default();
        raw.plugin.script_name = "../evil.sh".to_string();

        assert!(matches!(
            PluginSettings::try_from(raw),
            Err(RunScriptError::ConfigError(_))
        ));
    }

    #[test]
    fn rejects_summary_capacity_below_marker_length() {
        let mut raw = RawPluginSettings::default();
        raw.output.summary_capacity = 10;

        match PluginSettings::try_from(raw) {
            Err(RunScriptError::ConfigError(msg)) => assert!(msg.contains("summary_capacity")),
            other => panic!("expected ConfigError, got {other:?}"),
        }

        let mut raw = RawPluginSettings::default();
        raw.output.summary_capacity = MIN_SUMMARY_CAPACITY;
        assert!(PluginSettings::try_from(raw).is_ok());
    }
}
