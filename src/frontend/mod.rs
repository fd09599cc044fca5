//! apigen frontend
//!
//! This module contains everything between the input source text and the analyzed model:
//! - `analyzer`: parse the input with `syn` and collect records and marked methods
//! - `descriptor`: endpoint descriptors in doc comments
//! - `tags`: field tag parsing and record building
//! - `model`: the analyzed model handed to the backend
//! - `errors`: fatal generation errors

pub mod analyzer;
pub mod descriptor;
pub mod errors;
pub mod model;
pub mod tags;

pub use analyzer::SourceAnalyzer;
pub use errors::GenerationError;
pub use model::ApiModel;
