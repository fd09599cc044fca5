//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::collections::BTreeMap;
use std::path::Path;

use crate::backend::ApiCodegen;
use crate::config::GenerateConfig;
use crate::files::{self, FileError};

use super::{CliError, CliResult, ExitCode};

/// Render a library error with its diagnostic code and help text.
fn report(err: FileError) -> CliError {
    CliError::failure(format!("{:?}", miette::Report::new(err)))
}

/// Generate handlers for `input` into `output`.
pub fn generate(input: &Path, output: &Path, config: &GenerateConfig) -> CliResult<ExitCode> {
    let source = files::read_source(input).map_err(report)?;
    let generated = ApiCodegen::new(config)
        .try_generate(&source)
        .map_err(|e| report(FileError::from(e)))?;
    files::write_atomically(output, &generated).map_err(report)?;

    tracing::info!(input = %input.display(), output = %output.display(), "generated handlers");
    Ok(ExitCode::SUCCESS)
}

/// Print the analyzed model of `input` (debug).
pub fn analyze_file(input: &Path, config: &GenerateConfig) -> CliResult<ExitCode> {
    let source = files::read_source(input).map_err(report)?;
    let model = ApiCodegen::new(config)
        .analyze(&source)
        .map_err(|e| report(FileError::from(e)))?;

    let records: BTreeMap<_, _> = model.records.iter().collect();
    println!("records: {:#?}", records);
    println!("services: {:#?}", model.services);
    Ok(ExitCode::SUCCESS)
}
