//! apigen version information.
//!
//! The generated file header and the CLI `--version` output both read this constant.

/// The apigen version string (for example, `0.1.0`).
pub const APIGEN_VERSION: &str = env!("CARGO_PKG_VERSION");
