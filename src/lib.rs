//! # variant-annotator
//!
//! Convert a two-allele SNP panel (`allele1`, `allele2`, no designated
//! reference) into REF/ALT form by looking up each position in an indexed
//! reference genome.
//!
//! Fingerprinting panels are often distributed as a pair of alleles per
//! site without saying which one is on the reference. `variant-annotator`
//! reads the reference base at every position from a directory of
//! per-chromosome indexed FASTA files and assigns the matching allele as
//! REF and the other as ALT.
//!
//! ## Features
//!
//! - **Indexed random access**: Bases are read through `.fai` indexes, never by loading whole chromosomes
//! - **Per-chromosome parallelism**: One worker per chromosome on a bounded pool
//! - **Deterministic output**: Results are merged in chromosome order, then input order
//! - **Fault isolation**: A missing chromosome file fails only that chromosome; a bad record fails only itself
//! - **Full accounting**: Every input record is either written or reported with a reason
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::atomic::AtomicBool;
//! use variant_annotator::{resolve, AnnotateConfig, AnnotationEngine, ReferenceDirectory, VariantRecord};
//!
//! // Pure allele resolution
//! let assignment = resolve(b'A', b'T', b'A').unwrap();
//! assert_eq!((assignment.reference, assignment.alternate), (b'A', b'T'));
//!
//! // Whole-table annotation
//! let references = ReferenceDirectory::scan(std::path::Path::new("refs/")).unwrap();
//! let records = vec![VariantRecord::new("chr1", 1000, "rs123", b'A', b'T')];
//! let engine = AnnotationEngine::new(&references, AnnotateConfig::default());
//! let run = engine.run(records, &AtomicBool::new(false)).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Records, partitions, and failure reasons
//! - [`parsing`]: Input table and FASTA index readers
//! - [`reference`]: Reference directory and indexed base lookup
//! - [`annotation`]: Resolver, chromosome worker, and orchestration engine
//! - [`output`]: Output tables and run report rendering
//! - [`cli`]: Command-line interface implementation

pub mod annotation;
pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod reference;
pub mod utils;

// Re-export commonly used types for convenience
pub use annotation::{
    resolve, resolve_with, AlleleAssignment, AnnotateConfig, AnnotateError, AnnotationEngine,
    AnnotationRun, ResolverOptions, RunReport,
};
pub use crate::core::{
    ChromosomeOrder, ChromosomePartition, FailureReason, ResolutionFailure, ResolvedRecord,
    VariantRecord,
};
pub use reference::{BaseLookup, ReferenceDirectory, ReferenceError, ReferenceHandle};
