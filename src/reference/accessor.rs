use std::fs::File;
use std::path::{Path, PathBuf};

use noodles::core::{Position, Region};
use noodles::fasta;
use tracing::debug;

use crate::parsing::fai::{indexed_sequences, read_fai_file, IndexedSequence};
use crate::reference::directory::ReferenceFiles;
use crate::reference::ReferenceError;

/// Random-access lookup of single reference bases by 1-based position
pub trait BaseLookup {
    /// Uppercase base at `position` (1-based, inclusive)
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::PositionOutOfRange` for positions outside the
    /// sequence, or another `ReferenceError` if the lookup itself fails.
    fn base_at(&mut self, position: u64) -> Result<u8, ReferenceError>;
}

/// One open indexed FASTA file for one chromosome.
///
/// The sequence queried is the first one listed in the index. The file is
/// closed when the handle is dropped.
pub struct ReferenceHandle {
    chromosome: String,
    path: PathBuf,
    sequence: IndexedSequence,
    reader: fasta::io::IndexedReader<fasta::io::BufReader<File>>,
}

impl ReferenceHandle {
    /// Open a FASTA file using its existing `.fai` index
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Index` if the index is unreadable or empty, or
    /// `ReferenceError::Io` if the FASTA cannot be opened.
    pub fn open(chromosome: &str, files: &ReferenceFiles) -> Result<Self, ReferenceError> {
        let index = read_fai_file(&files.index)?;
        let sequence = indexed_sequences(&index)
            .into_iter()
            .next()
            .ok_or_else(|| crate::parsing::fai::IndexError::Empty(files.index.clone()))?;

        let reader = fasta::io::indexed_reader::Builder::default()
            .set_index(index)
            .build_from_path(&files.fasta)?;

        debug!(
            "Opened {} for {chromosome} (sequence {}, {} bp)",
            files.fasta.display(),
            sequence.name,
            sequence.length
        );

        Ok(Self {
            chromosome: chromosome.to_string(),
            path: files.fasta.clone(),
            sequence,
            reader,
        })
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the sequence inside the FASTA (may differ from the chromosome label)
    pub fn sequence_name(&self) -> &str {
        &self.sequence.name
    }

    pub fn length(&self) -> u64 {
        self.sequence.length
    }
}

impl BaseLookup for ReferenceHandle {
    fn base_at(&mut self, position: u64) -> Result<u8, ReferenceError> {
        if position == 0 || position > self.sequence.length {
            return Err(ReferenceError::PositionOutOfRange {
                sequence: self.sequence.name.clone(),
                position,
                length: self.sequence.length,
            });
        }

        let pos = usize::try_from(position).map_err(|_| ReferenceError::PositionOutOfRange {
            sequence: self.sequence.name.clone(),
            position,
            length: self.sequence.length,
        })?;

        let start = Position::try_from(pos)?;
        let region = Region::new(self.sequence.name.clone(), start..=start);
        let record = self.reader.query(&region)?;

        record
            .sequence()
            .as_ref()
            .first()
            .map(u8::to_ascii_uppercase)
            .ok_or_else(|| ReferenceError::EmptyLookup {
                sequence: self.sequence.name.clone(),
                position,
            })
    }
}
