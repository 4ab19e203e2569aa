//! File-name conventions for per-chromosome FASTA files.
//!
//! Supported extensions: `.fa`, `.fasta`, `.fna` (uncompressed, indexed
//! with a sibling `.fai`).

use std::ffi::OsStr;
use std::path::Path;

/// Extensions recognised as FASTA, in lookup order
pub const FASTA_EXTENSIONS: [&str; 3] = ["fa", "fasta", "fna"];

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Chromosome name a FASTA file stands for (`refs/chr7.fa` -> `chr7`)
pub fn chromosome_name(path: &Path) -> Option<String> {
    if !is_fasta_file(path) {
        return None;
    }
    path.file_stem()
        .and_then(OsStr::to_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
