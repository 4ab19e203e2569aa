//! Reference-based allele resolution.
//!
//! This module provides the annotation pipeline:
//!
//! - [`resolver`]: Pure REF/ALT assignment from a reference base and two alleles
//! - [`worker`]: Resolves one chromosome partition against its own reference handle
//! - [`engine`]: Partitions the input, runs workers on a bounded pool, merges in order
//! - [`report`]: Aggregated counts for a run
//!
//! ## Failure tiers
//!
//! | Tier | Reasons | Effect |
//! |------|---------|--------|
//! | Partition | `MissingChromosomeFile` | Every record of that chromosome fails, others proceed |
//! | Record | `OutOfRangePosition`, `AlleleMismatch`, `ReferenceOnlyAlleles`, `NoReferenceBase`, `ProcessingFault` | Only that record fails |
//!
//! Pre-flight problems (bad header, unusable reference directory) are
//! reported by [`crate::utils::validation`] before any work is scheduled.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::atomic::AtomicBool;
//! use variant_annotator::{AnnotateConfig, AnnotationEngine, ReferenceDirectory};
//! use variant_annotator::parsing::tsv::read_records;
//!
//! let references = ReferenceDirectory::scan(Path::new("refs/")).unwrap();
//! let records = read_records(Path::new("panel.tsv"), true).unwrap();
//!
//! let engine = AnnotationEngine::new(&references, AnnotateConfig::default());
//! let run = engine.run(records, &AtomicBool::new(false)).unwrap();
//!
//! println!("{} resolved, {} failed", run.report.resolved, run.report.failed);
//! ```

pub mod engine;
pub mod report;
pub mod resolver;
pub mod worker;

use thiserror::Error;

pub use engine::{AnnotateConfig, AnnotationEngine, AnnotationRun};
pub use report::{ChromosomeSummary, RunReport};
pub use resolver::{resolve, resolve_with, AlleleAssignment, ResolverOptions};

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("Failed to create worker pool: {0}")]
    ThreadPool(String),

    #[error("Run cancelled before all chromosomes completed")]
    Cancelled,
}
