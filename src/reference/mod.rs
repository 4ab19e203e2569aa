//! Access to a directory of per-chromosome indexed FASTA files.
//!
//! - [`ReferenceDirectory`]: discovers `<chrom>.fa` + `<chrom>.fa.fai` pairs
//! - [`ReferenceHandle`]: one open, indexed FASTA answering "which base is at
//!   position P", with random access instead of loading the sequence
//!
//! Handles are opened by the worker that uses them and dropped when the
//! worker finishes, which closes the underlying file on every exit path.

pub mod accessor;
pub mod directory;

use std::path::PathBuf;

use thiserror::Error;

use crate::parsing::fai::IndexError;

pub use accessor::{BaseLookup, ReferenceHandle};
pub use directory::{ReferenceDirectory, ReferenceFiles};

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA index: {0}")]
    Index(#[from] IndexError),

    #[error("No indexed reference file for {chromosome} in {}", directory.display())]
    MissingChromosome {
        chromosome: String,
        directory: PathBuf,
    },

    #[error("Position {position} is outside {sequence} (length {length})")]
    PositionOutOfRange {
        sequence: String,
        position: u64,
        length: u64,
    },

    #[error("Invalid genomic position: {0}")]
    InvalidPosition(#[from] noodles::core::position::TryFromIntError),

    #[error("No base returned for {sequence}:{position}")]
    EmptyLookup { sequence: String, position: u64 },
}
