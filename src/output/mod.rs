//! Output artifacts: the REF/ALT table, the failure table, and the run report.
//!
//! Tables are written to a temporary file in the destination directory and
//! renamed into place once complete, so a reader never sees a partial file.

pub mod report;
pub mod tsv;

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write a file through a temporary sibling and rename it into place
///
/// # Errors
///
/// Returns `OutputError::Io` if writing fails or `OutputError::Persist` if the
/// final rename fails. The destination is untouched on error.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<(), OutputError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), OutputError>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.persist(path)?;
    Ok(())
}
