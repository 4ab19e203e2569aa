use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::parsing::fai::index_path_for;
use crate::parsing::fasta::{chromosome_name, FASTA_EXTENSIONS};
use crate::reference::accessor::ReferenceHandle;
use crate::reference::ReferenceError;

/// A FASTA file and its index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFiles {
    pub fasta: PathBuf,
    pub index: PathBuf,
}

/// Per-chromosome reference files found in one directory.
///
/// A file `chr7.fa` with a sibling `chr7.fa.fai` serves chromosome `chr7`.
/// When several extensions exist for the same name, `.fa` wins over `.fasta`
/// which wins over `.fna`.
#[derive(Debug, Clone)]
pub struct ReferenceDirectory {
    root: PathBuf,
    entries: BTreeMap<String, ReferenceFiles>,
    unindexed: Vec<PathBuf>,
}

impl ReferenceDirectory {
    /// Scan a directory for indexed FASTA files (non-recursive)
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Io` if the directory cannot be listed.
    pub fn scan(root: &Path) -> Result<Self, ReferenceError> {
        let mut candidates: Vec<(String, usize, PathBuf)> = Vec::new();

        for entry in std::fs::read_dir(root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = chromosome_name(&path) else {
                continue;
            };
            let rank = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_lowercase)
                .and_then(|ext| FASTA_EXTENSIONS.iter().position(|e| *e == ext))
                .unwrap_or(FASTA_EXTENSIONS.len());
            candidates.push((name, rank, path));
        }
        candidates.sort();

        let mut entries = BTreeMap::new();
        let mut unindexed = Vec::new();
        for (name, _, fasta) in candidates {
            let index = index_path_for(&fasta);
            if !index.is_file() {
                unindexed.push(fasta);
                continue;
            }
            entries
                .entry(name)
                .or_insert(ReferenceFiles { fasta, index });
        }

        debug!(
            "Found {} indexed reference file(s) in {}",
            entries.len(),
            root.display()
        );

        Ok(Self {
            root: root.to_path_buf(),
            entries,
            unindexed,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chromosome names with a usable file, sorted
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// FASTA files that were skipped because they have no `.fai`
    pub fn unindexed(&self) -> &[PathBuf] {
        &self.unindexed
    }

    /// Find the files for a chromosome.
    ///
    /// Tries the name as given, then `chr<name>` for names without the prefix.
    pub fn locate(&self, chromosome: &str) -> Option<&ReferenceFiles> {
        self.entries.get(chromosome).or_else(|| {
            if chromosome.starts_with("chr") {
                None
            } else {
                self.entries.get(&format!("chr{chromosome}"))
            }
        })
    }

    /// Open a fresh handle for one chromosome
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::MissingChromosome` if no file serves the
    /// chromosome, or the error from [`ReferenceHandle::open`].
    pub fn open(&self, chromosome: &str) -> Result<ReferenceHandle, ReferenceError> {
        let files = self
            .locate(chromosome)
            .ok_or_else(|| ReferenceError::MissingChromosome {
                chromosome: chromosome.to_string(),
                directory: self.root.clone(),
            })?;
        ReferenceHandle::open(chromosome, files)
    }
}
