//! Whole-file input and output for one generation run.
//!
//! ## Notes
//!
//! - Inputs are size-checked before reading.
//! - Output goes to a temporary file in the destination directory and is renamed over the destination, so a failed
//!   run never leaves a partial file behind.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::{fs, io};

use miette::Diagnostic;
use thiserror::Error;

use crate::frontend::GenerationError;

/// Maximum input file size (100 MB)
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Failure of a file-to-file generation run.
#[derive(Debug, Error, Diagnostic)]
pub enum FileError {
    #[error("cannot read '{}': {source}", path.display())]
    #[diagnostic(code(apigen::read))]
    Read { path: PathBuf, source: io::Error },

    #[error("source file '{}' is too large ({size} bytes, max {MAX_SOURCE_SIZE} bytes)", path.display())]
    #[diagnostic(code(apigen::too_large))]
    TooLarge { path: PathBuf, size: u64 },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Generate(#[from] GenerationError),

    #[error("cannot write '{}': {source}", path.display())]
    #[diagnostic(code(apigen::write))]
    Write { path: PathBuf, source: io::Error },
}

/// Read a source file to a string.
///
/// Returns an error if the file cannot be read or exceeds [`MAX_SOURCE_SIZE`].
pub fn read_source(path: &Path) -> Result<String, FileError> {
    let read_error = |source| FileError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(read_error)?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(FileError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
        });
    }

    fs::read_to_string(path).map_err(read_error)
}

/// Replace `path` with `contents` in one rename.
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), FileError> {
    let write_error = |source| FileError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(contents.as_bytes()).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
