// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{PluginSettings, RawPluginSettings};
use crate::errors::Result;

/// Load plugin settings from a given path and return the raw
/// `RawPluginSettings`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPluginSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let settings: RawPluginSettings = toml::from_str(&contents)?;

    Ok(settings)
}

/// Load plugin settings from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks file naming, shell selection, output limits and timeout bounds.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PluginSettings> {
    let raw = load_from_path(&path)?;
    let settings = PluginSettings::try_from(raw)?;
    Ok(settings)
}

/// Load settings from `path` when one is given, otherwise use defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<PluginSettings> {
    match path {
        Some(p) => load_and_validate(p),
        None => Ok(PluginSettings::default()),
    }
}
