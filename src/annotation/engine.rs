use std::sync::atomic::AtomicBool;
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::annotation::report::RunReport;
use crate::annotation::resolver::ResolverOptions;
use crate::annotation::worker::{process_partition, PartitionResult};
use crate::annotation::AnnotateError;
use crate::core::partition::partition_records;
use crate::core::record::{ResolutionFailure, ResolvedRecord, VariantRecord};
use crate::core::types::ChromosomeOrder;
use crate::reference::ReferenceDirectory;

/// Configuration for an annotation run
#[derive(Debug, Clone, Default)]
pub struct AnnotateConfig {
    /// Worker pool size; 0 means host parallelism
    pub workers: usize,

    /// Partition (and output) order
    pub chromosome_order: ChromosomeOrder,

    /// Keep only the first N records of each chromosome
    pub max_records_per_chromosome: Option<usize>,

    pub resolver: ResolverOptions,
}

impl AnnotateConfig {
    /// Worker count after applying the host-parallelism default
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            host_parallelism()
        } else {
            self.workers
        }
    }
}

/// Number of threads the host can run in parallel (at least 1)
#[must_use]
pub fn host_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Merged result of a complete run
#[derive(Debug, Clone)]
pub struct AnnotationRun {
    /// Resolved records in partition order, then input order
    pub resolved: Vec<ResolvedRecord>,
    /// Failed records in the same order
    pub failures: Vec<ResolutionFailure>,
    pub report: RunReport,
}

/// Partitions records by chromosome and resolves them on a bounded pool
pub struct AnnotationEngine<'a> {
    references: &'a ReferenceDirectory,
    config: AnnotateConfig,
}

impl<'a> AnnotationEngine<'a> {
    pub fn new(references: &'a ReferenceDirectory, config: AnnotateConfig) -> Self {
        Self { references, config }
    }

    /// Run every partition and merge the results.
    ///
    /// Results are merged in partition order regardless of which worker
    /// finishes first, so identical input gives identical output.
    ///
    /// # Errors
    ///
    /// Returns `AnnotateError::ThreadPool` if the pool cannot be built, or
    /// `AnnotateError::Cancelled` if `cancel` is set during the run. Nothing
    /// is returned for partially completed runs.
    pub fn run(
        &self,
        records: Vec<VariantRecord>,
        cancel: &AtomicBool,
    ) -> Result<AnnotationRun, AnnotateError> {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut partitions = partition_records(records, self.config.chromosome_order);
        if let Some(max) = self.config.max_records_per_chromosome {
            for partition in &mut partitions {
                let dropped = partition.truncate(max);
                if dropped > 0 {
                    warn!(
                        "Limiting {} to {max} records ({dropped} skipped)",
                        partition.chromosome
                    );
                }
            }
        }

        let workers = self.config.effective_workers();
        info!(
            "Processing {} chromosome(s) with {workers} worker(s)",
            partitions.len()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("annotate-worker-{i}"))
            .build()
            .map_err(|e| AnnotateError::ThreadPool(e.to_string()))?;

        let references = self.references;
        let options = self.config.resolver;
        let results: Vec<PartitionResult> = pool.install(|| {
            partitions
                .par_iter()
                .map(|partition| process_partition(partition, references, options, cancel))
                .collect::<Result<Vec<_>, _>>()
        })?;

        Ok(merge(results, workers, started_at, start))
    }
}

/// Concatenate partition results in order and build the report
fn merge(
    results: Vec<PartitionResult>,
    workers: usize,
    started_at: chrono::DateTime<Utc>,
    start: Instant,
) -> AnnotationRun {
    let mut report = RunReport::new(started_at, workers);
    let mut resolved = Vec::new();
    let mut failures = Vec::new();

    for result in results {
        report.add_partition(&result);
        for outcome in result.outcomes {
            match outcome {
                Ok(record) => resolved.push(record),
                Err(failure) => failures.push(failure),
            }
        }
    }

    report.finish(start.elapsed());
    debug_assert!(report.is_balanced());

    AnnotationRun {
        resolved,
        failures,
        report,
    }
}
