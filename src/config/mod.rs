// src/config/mod.rs

//! Plugin settings loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed settings model (`model.rs`).
//! - Load a settings file from disk (`loader.rs`).
//! - Validate file naming, limits and timeout bounds (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{
    OutputSection, PluginSection, PluginSettings, RawPluginSettings, TimeoutSection,
    UploadSection,
};
