#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
//! apigen: HTTP handler and validator generator
//!
//! apigen reads one Rust source file containing parameter structs whose fields carry `#[apivalidator("...")]` tags
//! and methods whose doc comment carries an `apigen:api {json}` endpoint descriptor. It writes a second Rust file
//! with a `serve_http` dispatcher per receiver type, one handler per endpoint and one `validate` routine per
//! parameter struct. The generated file is compiled as a child module of the input module.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//! - **Test code**: `.unwrap()` is acceptable in tests.
//! - **Generated code**: The emitter only produces code that propagates failures as HTTP responses.
//!
//! ## Example
//!
//! ```rust,ignore
//! // build.rs
//! let config = apigen::GenerateConfig::default();
//! apigen::generate_file("src/api.rs", out_dir.join("api_handlers.rs"), &config)?;
//! ```

use std::path::Path;

pub mod backend;
pub mod cli;
pub mod config;
pub mod files;
pub mod frontend;
pub mod version;

pub use backend::ApiCodegen;
pub use config::GenerateConfig;
pub use files::FileError;
pub use frontend::{ApiModel, GenerationError};

/// Generate the handler module for the source text of one input file.
pub fn generate_source(source: &str, config: &GenerateConfig) -> Result<String, GenerationError> {
    ApiCodegen::new(config).try_generate(source)
}

/// Read `input`, generate its handler module and write it to `output`.
///
/// Nothing is written unless generation succeeds.
#[tracing::instrument(skip_all, fields(input = %input.as_ref().display(), output = %output.as_ref().display()))]
pub fn generate_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &GenerateConfig,
) -> Result<(), FileError> {
    let source = files::read_source(input.as_ref())?;
    let generated = generate_source(&source, config)?;
    files::write_atomically(output.as_ref(), &generated)
}
