//! Core data types for allele resolution.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`VariantRecord`]: One row of the two-allele input table
//! - [`ResolvedRecord`]: A record whose REF and ALT have been assigned
//! - [`ResolutionFailure`]: A record that could not be resolved, with the reason
//! - [`ChromosomePartition`]: All records of one chromosome, the unit of parallel work
//! - [`FailureReason`], [`ChromosomeOrder`]: Classification and ordering types
//!
//! ## Outcomes
//!
//! Every input record ends up as exactly one [`RecordOutcome`]: either a
//! resolved REF/ALT pair or a failure. Failures are never dropped.

pub mod partition;
pub mod record;
pub mod types;

pub use partition::{partition_records, ChromosomePartition};
pub use record::{RecordOutcome, ResolutionFailure, ResolvedRecord, VariantRecord};
pub use types::{ChromosomeOrder, FailureReason};
