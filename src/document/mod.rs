// src/document/mod.rs

//! Document model and input normalization.
//!
//! - [`model`] defines [`Document`], the unit of execution.
//! - [`normalize`] turns the loosely-typed plugin properties (one document or
//!   an ordered list) into a validated `Vec<Document>`.
//! - [`segment`] maps document ids to output directory names.

pub mod model;
pub mod normalize;
pub mod segment;

pub use model::Document;
pub use normalize::{RawPayload, normalize};
pub use segment::{directory_segment, sanitize_segment};
