use std::path::PathBuf;

use serde_json::{Value, json};
use runscript::config::{PluginSettings, RawPluginSettings};
use runscript::engine::Configuration;
use runscript::types::UploadMode;

pub const ORCHESTRATION_DIR: &str = "OrchesDir";
pub const BUCKET: &str = "bucket";
pub const KEY_PREFIX: &str = "key";
pub const PLUGIN_ID: &str = "aws:runScript1";
pub const INVOCATION_ID: &str = "command-1234";

/// Settings used across the integration tests: small limits, a short
/// truncation suffix and synchronous uploads.
pub fn test_settings() -> PluginSettings {
    settings_with_mode(UploadMode::Sync)
}

pub fn settings_with_mode(mode: UploadMode) -> PluginSettings {
    let mut raw = RawPluginSettings::default();
    raw.plugin.stdout_file_name = "stdout".to_string();
    raw.plugin.stderr_file_name = "stderr".to_string();
    raw.plugin.script_name = "_script.sh".to_string();
    raw.plugin.shell_command = "sh".to_string();
    raw.plugin.shell_args = Vec::new();
    raw.output.max_stdout_length = 1000;
    raw.output.max_stderr_length = 1000;
    raw.output.truncation_suffix = "-more-".to_string();
    raw.upload.mode = mode;
    PluginSettings::try_from(raw).expect("test settings are valid")
}

/// Builder for one document in its wire (JSON) form.
pub struct DocumentBuilder {
    id: String,
    commands: Vec<String>,
    working_directory: String,
    timeout_seconds: String,
}

impl DocumentBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            commands: Vec::new(),
            working_directory: String::new(),
            timeout_seconds: String::new(),
        }
    }

    pub fn command(mut self, line: &str) -> Self {
        self.commands.push(line.to_string());
        self
    }

    pub fn working_dir(mut self, dir: &str) -> Self {
        self.working_directory = dir.to_string();
        self
    }

    pub fn timeout(mut self, secs: &str) -> Self {
        self.timeout_seconds = secs.to_string();
        self
    }

    pub fn build(self) -> Value {
        json!({
            "ID": self.id,
            "RunCommand": self.commands,
            "WorkingDirectory": self.working_directory,
            "TimeoutSeconds": self.timeout_seconds,
        })
    }
}

/// Builder for an invocation `Configuration`.
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    pub fn new(properties: Value) -> Self {
        Self {
            config: Configuration {
                properties,
                output_bucket: BUCKET.to_string(),
                output_key_prefix: KEY_PREFIX.to_string(),
                orchestration_dir: PathBuf::from(ORCHESTRATION_DIR),
                invocation_id: INVOCATION_ID.to_string(),
                plugin_id: PLUGIN_ID.to_string(),
            },
        }
    }

    pub fn bucket(mut self, bucket: &str) -> Self {
        self.config.output_bucket = bucket.to_string();
        self
    }

    pub fn orchestration_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.orchestration_dir = dir.into();
        self
    }

    pub fn build(self) -> Configuration {
        self.config
    }
}
