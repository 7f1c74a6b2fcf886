// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `runscript`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runscript",
    version,
    about = "Run command documents, capture their output and ship it to storage.",
    long_about = None
)]
pub struct CliArgs {
    /// JSON file with the plugin properties: one document or a list.
    #[arg(long, value_name = "PATH")]
    pub payload: PathBuf,

    /// Plugin settings (TOML). Built-in defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Root directory for per-document output files.
    #[arg(long, value_name = "DIR", default_value = "orchestration")]
    pub orchestration_dir: PathBuf,

    /// Plugin id, used for documents without an `ID`.
    #[arg(long, value_name = "ID", default_value = "aws:runShellScript")]
    pub plugin_id: String,

    /// Invocation id for log correlation. Defaults to a timestamp.
    #[arg(long, value_name = "ID")]
    pub invocation_id: Option<String>,

    /// Output bucket; uploading is disabled when empty.
    #[arg(long, value_name = "NAME", default_value = "")]
    pub bucket: String,

    /// Key prefix inside the bucket.
    #[arg(long, value_name = "PREFIX", default_value = "")]
    pub key_prefix: String,

    /// Directory acting as the object store for uploads.
    #[arg(long, value_name = "DIR", default_value = "output-store")]
    pub store_root: PathBuf,

    /// Print the full result as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNSCRIPT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let args = CliArgs::try_parse_from(["runscript", "--payload", "doc.json"]).unwrap();
        assert_eq!(args.payload, PathBuf::from("doc.json"));
        assert_eq!(args.plugin_id, "aws:runShellScript");
        assert!(args.bucket.is_empty());
        assert!(args.settings.is_none());
        assert!(!args.json);
    }

    #[test]
    fn payload_is_required() {
        assert!(CliArgs::try_parse_from(["runscript"]).is_err());
    }
}
