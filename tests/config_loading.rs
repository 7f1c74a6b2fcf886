// tests/config_loading.rs

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;

use runscript::config::{load_and_validate, load_or_default};
use runscript::errors::RunScriptError;
use runscript::types::UploadMode;

fn settings_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_full_settings_file_is_loaded() {
    let file = settings_file(
        r#"
[plugin]
name = "aws:runPowerShellScript"
stdout_file_name = "out.txt"
stderr_file_name = "err.txt"
script_name = "run.ps1"
shell_command = "pwsh"
shell_args = ["-File"]

[output]
max_stdout_length = 100
max_stderr_length = 50
truncation_suffix = "..."
summary_capacity = 80

[upload]
mode = "async"

[timeout]
default_seconds = 60
min_seconds = 1
max_seconds = 600
"#,
    );

    let settings = load_and_validate(file.path()).unwrap();

    assert_eq!(settings.plugin.name, "aws:runPowerShellScript");
    assert_eq!(settings.plugin.shell_args, vec!["-File".to_string()]);
    assert_eq!(settings.output_limits().max_stderr_len, 50);
    assert_eq!(settings.upload.mode, UploadMode::Async);
    assert_eq!(settings.resolve_timeout(""), Duration::from_secs(60));
    assert_eq!(settings.resolve_timeout("1"), Duration::from_secs(1));
    assert_eq!(settings.resolve_timeout("601"), Duration::from_secs(60));
}

#[test]
fn test_empty_settings_file_uses_defaults() {
    let file = settings_file("");

    let settings = load_and_validate(file.path()).unwrap();

    assert_eq!(settings.plugin.stdout_file_name, "stdout");
    assert_eq!(settings.plugin.stderr_file_name, "stderr");
    assert_eq!(settings.output.max_stdout_length, 2500);
    assert_eq!(settings.upload.mode, UploadMode::Sync);
    assert_eq!(settings.resolve_timeout(""), Duration::from_secs(3600));
}

#[test]
fn test_no_settings_path_uses_defaults() {
    let settings = load_or_default(None).unwrap();
    assert_eq!(settings.output.truncation_suffix, "--output truncated--");
}

#[test]
fn test_colliding_file_names_return_config_error() {
    let file = settings_file(
        r#"
[plugin]
stdout_file_name = "output"
stderr_file_name = "output"
"#,
    );

    match load_and_validate(file.path()) {
        Err(RunScriptError::ConfigError(msg)) => assert!(msg.contains("must differ")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_inverted_timeout_bounds_return_config_error() {
    let file = settings_file(
        r#"
[timeout]
default_seconds = 10
min_seconds = 20
max_seconds = 30
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(RunScriptError::ConfigError(_))
    ));
}

#[test]
fn test_unknown_upload_mode_is_a_toml_error() {
    let file = settings_file(
        r#"
[upload]
mode = "eventually"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(RunScriptError::TomlError(_))
    ));
}

#[test]
fn test_missing_settings_file_is_an_io_error() {
    let result = load_or_default(Some(Path::new("/definitely/not/here/runscript.toml")));
    assert!(matches!(result, Err(RunScriptError::IoError(_))));
}
