//! Resolve every record of one chromosome partition.

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::annotation::resolver::{resolve_with, ResolverOptions};
use crate::annotation::AnnotateError;
use crate::core::partition::ChromosomePartition;
use crate::core::record::{RecordOutcome, ResolutionFailure, ResolvedRecord, VariantRecord};
use crate::core::types::FailureReason;
use crate::reference::{BaseLookup, ReferenceDirectory, ReferenceError};

/// Minimum time between progress lines for one partition
const PROGRESS_INTERVAL: Duration = Duration::from_secs(30);

/// Counts for one partition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartitionTally {
    pub total: usize,
    pub resolved: usize,
    pub strand_flipped: usize,
    pub failures: BTreeMap<FailureReason, usize>,
}

impl PartitionTally {
    pub fn record(&mut self, outcome: &RecordOutcome) {
        self.total += 1;
        match outcome {
            Ok(resolved) => {
                self.resolved += 1;
                if resolved.strand_flipped {
                    self.strand_flipped += 1;
                }
            }
            Err(failure) => *self.failures.entry(failure.reason).or_insert(0) += 1,
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.values().sum()
    }
}

/// Ordered outcomes for one partition plus its tally
#[derive(Debug, Clone)]
pub struct PartitionResult {
    pub chromosome: String,
    /// One entry per input record, in input order
    pub outcomes: Vec<RecordOutcome>,
    pub tally: PartitionTally,
    pub elapsed: Duration,
}

/// Process one partition against its own freshly opened reference handle.
///
/// If the handle cannot be opened, every record fails with
/// `MissingChromosomeFile`. Otherwise each record is resolved independently.
///
/// # Errors
///
/// Returns `AnnotateError::Cancelled` if `cancel` is set before the partition
/// finishes.
pub fn process_partition(
    partition: &ChromosomePartition,
    references: &ReferenceDirectory,
    options: ResolverOptions,
    cancel: &AtomicBool,
) -> Result<PartitionResult, AnnotateError> {
    if cancel.load(Ordering::Relaxed) {
        return Err(AnnotateError::Cancelled);
    }

    let start = Instant::now();
    info!(
        "Started processing chromosome {} ({} records)",
        partition.chromosome,
        partition.len()
    );

    let result = match references.open(&partition.chromosome) {
        Ok(mut handle) => resolve_partition(partition, &mut handle, options, cancel)?,
        Err(e) => fail_partition(partition, &e, start),
    };

    info!(
        "Finished {} in {:.2}s - resolved: {}, failed: {}",
        partition.chromosome,
        result.elapsed.as_secs_f64(),
        result.tally.resolved,
        result.tally.failed()
    );

    Ok(result)
}

/// Resolve every record of a partition with an already open lookup.
///
/// A panic while resolving one record is caught and recorded as a
/// `ProcessingFault` for that record; the remaining records still run.
///
/// # Errors
///
/// Returns `AnnotateError::Cancelled` if `cancel` is set between records.
pub fn resolve_partition<L: BaseLookup>(
    partition: &ChromosomePartition,
    lookup: &mut L,
    options: ResolverOptions,
    cancel: &AtomicBool,
) -> Result<PartitionResult, AnnotateError> {
    let start = Instant::now();
    let mut last_report = start;
    let total = partition.len();
    let mut outcomes = Vec::with_capacity(total);
    let mut tally = PartitionTally::default();

    for (i, record) in partition.records.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            debug!("{}: cancelled after {i} of {total} records", partition.chromosome);
            return Err(AnnotateError::Cancelled);
        }

        if last_report.elapsed() >= PROGRESS_INTERVAL {
            #[allow(clippy::cast_precision_loss)] // Progress percentage only
            let pct = i as f64 / total as f64 * 100.0;
            info!(
                "Processing {}: {i}/{total} records ({pct:.1}%)",
                partition.chromosome
            );
            last_report = Instant::now();
        }

        let outcome = catch_unwind(AssertUnwindSafe(|| resolve_record(record, lookup, options)))
            .unwrap_or_else(|payload| {
                Err(ResolutionFailure::new(
                    record,
                    FailureReason::ProcessingFault,
                    format!("panic while resolving {}: {}", record.locus(), panic_message(&*payload)),
                ))
            });

        if let Err(failure) = &outcome {
            warn!("{} {}: {}", failure.reason, record.id, failure.detail);
        }

        tally.record(&outcome);
        outcomes.push(outcome);
    }

    Ok(PartitionResult {
        chromosome: partition.chromosome.clone(),
        outcomes,
        tally,
        elapsed: start.elapsed(),
    })
}

/// Resolve a single record against the reference
pub fn resolve_record<L: BaseLookup>(
    record: &VariantRecord,
    lookup: &mut L,
    options: ResolverOptions,
) -> RecordOutcome {
    let locus = record.locus();

    let ref_base = match lookup.base_at(record.position) {
        Ok(base) => base,
        Err(e @ ReferenceError::PositionOutOfRange { .. }) => {
            return Err(ResolutionFailure::new(
                record,
                FailureReason::OutOfRangePosition,
                e.to_string(),
            ));
        }
        Err(e) => {
            return Err(ResolutionFailure::new(
                record,
                FailureReason::NoReferenceBase,
                format!("could not fetch base at {locus}: {e}"),
            ));
        }
    };

    let allele1 = char::from(record.allele1.to_ascii_uppercase());
    let allele2 = char::from(record.allele2.to_ascii_uppercase());
    let ref_char = char::from(ref_base);

    match resolve_with(ref_base, record.allele1, record.allele2, options) {
        Ok(assignment) => Ok(ResolvedRecord::new(
            record,
            assignment.reference,
            assignment.alternate,
            assignment.strand_flipped,
        )),
        Err(reason) => {
            let detail = match reason {
                FailureReason::NoReferenceBase => {
                    format!("reference base '{ref_char}' at {locus} is not A/C/G/T")
                }
                FailureReason::ReferenceOnlyAlleles => {
                    format!("both alleles {allele1}/{allele2} equal reference base {ref_char} at {locus}")
                }
                _ => format!(
                    "neither allele {allele1}/{allele2} matches reference base {ref_char} at {locus}"
                ),
            };
            Err(ResolutionFailure::new(record, reason, detail))
        }
    }
}

/// Every record of the partition fails with `MissingChromosomeFile`
fn fail_partition(
    partition: &ChromosomePartition,
    error: &ReferenceError,
    start: Instant,
) -> PartitionResult {
    warn!(
        "Chromosome {} failed as a whole ({} records): {error}",
        partition.chromosome,
        partition.len()
    );

    let detail = error.to_string();
    let mut tally = PartitionTally::default();
    let outcomes: Vec<RecordOutcome> = partition
        .records
        .iter()
        .map(|record| {
            let outcome = Err(ResolutionFailure::new(
                record,
                FailureReason::MissingChromosomeFile,
                detail.clone(),
            ));
            tally.record(&outcome);
            outcome
        })
        .collect();

    PartitionResult {
        chromosome: partition.chromosome.clone(),
        outcomes,
        tally,
        elapsed: start.elapsed(),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
