//! CLI module for apigen
//!
//! ## Usage
//!
//! - `apigen <INPUT> <OUTPUT>` - Generate handlers for INPUT into OUTPUT
//! - `--marker`, `--tag-attribute`, `--auth-header`, `--auth-secret` - Override the annotation and auth defaults
//! - `apigen --analyze <INPUT>` - Print the analyzed model (debug)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::config::{DEFAULT_AUTH_HEADER, DEFAULT_AUTH_SECRET, DEFAULT_MARKER, DEFAULT_TAG_ATTRIBUTE, GenerateConfig};
use crate::version::APIGEN_VERSION;

/// Process exit status of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// A failed command: the rendered diagnostic and the status `run` exits with.
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    /// Exit code 1 with `message` printed to stderr.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

pub type CliResult<T> = Result<T, CliError>;

/// Generate HTTP handlers and validators from annotated Rust source
#[derive(Parser, Debug)]
#[command(name = "apigen")]
#[command(version = APIGEN_VERSION)]
#[command(about = "Generate HTTP handlers and validators from annotated Rust source", long_about = None)]
pub struct Cli {
    /// Annotated Rust source file
    #[arg(value_name = "INPUT", required_unless_present = "analyze_file")]
    pub input: Option<PathBuf>,

    /// File to write the generated handlers to
    #[arg(value_name = "OUTPUT", required_unless_present = "analyze_file")]
    pub output: Option<PathBuf>,

    /// Header checked by generated auth middleware
    #[arg(long = "auth-header", value_name = "NAME", default_value = DEFAULT_AUTH_HEADER)]
    pub auth_header: String,

    /// Shared secret expected in the auth header
    #[arg(long = "auth-secret", value_name = "VALUE", default_value = DEFAULT_AUTH_SECRET)]
    pub auth_secret: String,

    /// Doc-comment marker of endpoint methods
    #[arg(long = "marker", value_name = "TOKEN", default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// Attribute carrying field tags
    #[arg(long = "tag-attribute", value_name = "NAME", default_value = DEFAULT_TAG_ATTRIBUTE)]
    pub tag_attribute: String,

    // Debug/development flags
    /// Print the analyzed model (debug)
    #[arg(long = "analyze", value_name = "FILE", conflicts_with_all = ["input", "output"])]
    pub analyze_file: Option<PathBuf>,
}

impl Cli {
    /// Generation settings selected by the flags.
    pub fn config(&self) -> GenerateConfig {
        GenerateConfig::new()
            .with_marker(&self.marker)
            .with_tag_attribute(&self.tag_attribute)
            .with_auth_header(&self.auth_header)
            .with_auth_secret(&self.auth_secret)
    }
}

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.config();

    if let Some(file) = cli.analyze_file {
        return commands::analyze_file(&file, &config);
    }

    match (cli.input, cli.output) {
        (Some(input), Some(output)) => commands::generate(&input, &output, &config),
        _ => Err(CliError::failure("Error: both INPUT and OUTPUT are required")),
    }
}
