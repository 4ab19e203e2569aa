//! Pre-flight checks run before any work is scheduled.
//!
//! A failure here aborts the run with no output artifact.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::parsing::tsv::{read_header_line, validate_header, InputError};
use crate::reference::ReferenceDirectory;

/// Pre-flight error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Cannot read input file {}: {reason}", path.display())]
    InputNotReadable { path: PathBuf, reason: String },
    #[error("Invalid header in {}: {reason}", path.display())]
    InvalidHeader { path: PathBuf, reason: String },
    #[error("Output directory not found: {}", .0.display())]
    OutputDirectoryMissing(PathBuf),
    #[error("No write permission for output {}", .0.display())]
    OutputNotWritable(PathBuf),
    #[error("Unreadable reference directory {}: {reason}", path.display())]
    UnreadableReferenceDirectory { path: PathBuf, reason: String },
}

/// Check the input exists, is readable, and (optionally) has the expected header
///
/// # Errors
///
/// Returns `InputNotFound`, `InputNotReadable`, or `InvalidHeader`.
pub fn validate_input(path: &Path, check_header: bool) -> Result<(), ValidationError> {
    if !path.is_file() {
        return Err(ValidationError::InputNotFound(path.to_path_buf()));
    }

    let header = read_header_line(path).map_err(|e| match e {
        InputError::MissingHeader => ValidationError::InvalidHeader {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
        other => ValidationError::InputNotReadable {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    if check_header {
        validate_header(&header).map_err(|e| ValidationError::InvalidHeader {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        info!("Header validation passed");
    }

    Ok(())
}

/// Check the output can be created: its directory exists and accepts new files
///
/// # Errors
///
/// Returns `OutputDirectoryMissing` or `OutputNotWritable`.
pub fn validate_output(path: &Path) -> Result<(), ValidationError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    if !dir.is_dir() {
        return Err(ValidationError::OutputDirectoryMissing(dir.to_path_buf()));
    }

    if let Ok(metadata) = std::fs::metadata(path) {
        if metadata.is_dir() || metadata.permissions().readonly() {
            return Err(ValidationError::OutputNotWritable(path.to_path_buf()));
        }
    }

    // Output is written through a temporary file in the same directory
    tempfile::NamedTempFile::new_in(dir)
        .map_err(|_| ValidationError::OutputNotWritable(dir.to_path_buf()))?;

    Ok(())
}

/// Scan the reference directory and require at least one indexed FASTA
///
/// # Errors
///
/// Returns `UnreadableReferenceDirectory` if the path is missing, not a
/// directory, unreadable, or holds no `<name>.fa` + `<name>.fa.fai` pair.
pub fn validate_reference_directory(path: &Path) -> Result<ReferenceDirectory, ValidationError> {
    let unreadable = |reason: String| ValidationError::UnreadableReferenceDirectory {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(unreadable("directory does not exist".to_string()));
    }
    if !path.is_dir() {
        return Err(unreadable("not a directory".to_string()));
    }

    let references = ReferenceDirectory::scan(path).map_err(|e| unreadable(e.to_string()))?;

    for fasta in references.unindexed() {
        warn!("Skipping {} (no .fai index)", fasta.display());
    }

    if references.is_empty() {
        return Err(unreadable(
            "no indexed FASTA files (expected <chrom>.fa with <chrom>.fa.fai)".to_string(),
        ));
    }

    info!(
        "Reference directory {} has {} indexed chromosome file(s)",
        path.display(),
        references.len()
    );

    Ok(references)
}

/// Run every pre-flight check, returning the scanned reference directory
///
/// # Errors
///
/// Returns the first `ValidationError` encountered.
pub fn preflight(
    input: &Path,
    output: &Path,
    ref_dir: &Path,
    check_header: bool,
) -> Result<ReferenceDirectory, ValidationError> {
    validate_input(input, check_header)?;
    validate_output(output)?;
    validate_reference_directory(ref_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::test_support::write_reference;

    const HEADER: &str = "#CHROM\tPOS\tID\tallele1\tallele2\n";

    #[test]
    fn test_validate_input() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.tsv");
        std::fs::write(&good, format!("{HEADER}chr1\t1\trs1\tA\tC\n")).unwrap();
        assert!(validate_input(&good, true).is_ok());

        let bad = dir.path().join("bad.tsv");
        std::fs::write(&bad, "#CHROM\tPOS\tID\tREF\tALT\n").unwrap();
        assert!(matches!(
            validate_input(&bad, true),
            Err(ValidationError::InvalidHeader { .. })
        ));
        assert!(validate_input(&bad, false).is_ok());

        let empty = dir.path().join("empty.tsv");
        std::fs::write(&empty, "").unwrap();
        assert!(matches!(
            validate_input(&empty, false),
            Err(ValidationError::InvalidHeader { .. })
        ));

        assert!(matches!(
            validate_input(&dir.path().join("missing.tsv"), true),
            Err(ValidationError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_validate_output() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_output(&dir.path().join("out.tsv")).is_ok());
        assert!(matches!(
            validate_output(&dir.path().join("nope").join("out.tsv")),
            Err(ValidationError::OutputDirectoryMissing(_))
        ));
        assert!(matches!(
            validate_output(dir.path()),
            Err(ValidationError::OutputNotWritable(_))
        ));
    }

    #[test]
    fn test_validate_reference_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            validate_reference_directory(&dir.path().join("missing")),
            Err(ValidationError::UnreadableReferenceDirectory { .. })
        ));

        // Exists but has no indexed FASTA
        std::fs::write(dir.path().join("chr1.fa"), ">chr1\nACGT\n").unwrap();
        assert!(matches!(
            validate_reference_directory(dir.path()),
            Err(ValidationError::UnreadableReferenceDirectory { .. })
        ));

        write_reference(dir.path(), "chr2", "chr2", "ACGT");
        let refs = validate_reference_directory(dir.path()).unwrap();
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_reference_path_is_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = validate_reference_directory(file.path()).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
