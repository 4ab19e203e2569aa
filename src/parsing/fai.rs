//! Reader for FASTA index (.fai) files using noodles.
//!
//! FAI format provides name, length and byte layout for each sequence.
//! Format: `name\tlength\toffset\tline_bases\tline_width`

use std::ffi::OsString;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use noodles::fasta;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("No sequences found in FAI file: {0}")]
    Empty(PathBuf),
}

/// Name and length of one indexed sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedSequence {
    pub name: String,
    pub length: u64,
}

/// Path of the index that accompanies a FASTA file (`ref.fa` -> `ref.fa.fai`)
pub fn index_path_for(fasta_path: &Path) -> PathBuf {
    let mut s = OsString::from(fasta_path.as_os_str());
    s.push(".fai");
    PathBuf::from(s)
}

/// Read a FASTA index (.fai) file using noodles
///
/// # Errors
///
/// Returns `IndexError::Io` if the file cannot be read, `IndexError::Noodles` if
/// parsing fails, or `IndexError::Empty` if it lists no sequences.
pub fn read_fai_file(path: &Path) -> Result<fasta::fai::Index, IndexError> {
    let reader = std::fs::File::open(path).map(BufReader::new)?;

    let index = fasta::fai::io::Reader::new(reader)
        .read_index()
        .map_err(|e| IndexError::Noodles(format!("Failed to parse FAI file: {e}")))?;

    if index.as_ref().is_empty() {
        return Err(IndexError::Empty(path.to_path_buf()));
    }

    Ok(index)
}

/// Names and lengths of the sequences in an index, in file order
pub fn indexed_sequences(index: &fasta::fai::Index) -> Vec<IndexedSequence> {
    index
        .as_ref()
        .iter()
        .map(|record| IndexedSequence {
            name: String::from_utf8_lossy(record.name()).to_string(),
            length: record.length(),
        })
        .collect()
}
