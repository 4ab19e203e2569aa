use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::annotation::worker::PartitionResult;
use crate::core::types::FailureReason;

/// Per-chromosome line of the run report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromosomeSummary {
    pub chromosome: String,
    pub records: usize,
    pub resolved: usize,
    pub failed: usize,
    /// Set when the whole partition failed for one reason (e.g. no reference file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_failure: Option<FailureReason>,
    pub elapsed_secs: f64,
}

/// Aggregate counts for one run.
///
/// `resolved + failed == total_records` always holds once the run is merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub workers: usize,
    pub total_records: usize,
    pub resolved: usize,
    pub failed: usize,
    pub strand_flipped: usize,
    /// Every reason is listed, including those with zero records
    pub failures_by_reason: BTreeMap<FailureReason, usize>,
    pub chromosomes: Vec<ChromosomeSummary>,
}

impl RunReport {
    pub fn new(started_at: DateTime<Utc>, workers: usize) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at,
            duration_secs: 0.0,
            workers,
            total_records: 0,
            resolved: 0,
            failed: 0,
            strand_flipped: 0,
            failures_by_reason: FailureReason::ALL.iter().map(|r| (*r, 0)).collect(),
            chromosomes: Vec::new(),
        }
    }

    /// Fold one partition's tally into the report
    pub fn add_partition(&mut self, result: &PartitionResult) {
        let tally = &result.tally;
        self.total_records += tally.total;
        self.resolved += tally.resolved;
        self.failed += tally.failed();
        self.strand_flipped += tally.strand_flipped;
        for (reason, count) in &tally.failures {
            *self.failures_by_reason.entry(*reason).or_insert(0) += count;
        }

        let partition_failure = tally
            .failures
            .keys()
            .copied()
            .find(|r| r.is_partition_fatal());

        self.chromosomes.push(ChromosomeSummary {
            chromosome: result.chromosome.clone(),
            records: tally.total,
            resolved: tally.resolved,
            failed: tally.failed(),
            partition_failure,
            elapsed_secs: result.elapsed.as_secs_f64(),
        });
    }

    pub fn finish(&mut self, elapsed: Duration) {
        self.duration_secs = elapsed.as_secs_f64();
    }

    /// Every record is accounted for exactly once
    pub fn is_balanced(&self) -> bool {
        self.resolved + self.failed == self.total_records
            && self.failures_by_reason.values().sum::<usize>() == self.failed
    }

    pub fn failures_for(&self, reason: FailureReason) -> usize {
        self.failures_by_reason.get(&reason).copied().unwrap_or(0)
    }

    /// Write the summary to the log
    pub fn log_summary(&self) {
        info!("Processing complete");
        info!("  Total records: {}", self.total_records);
        info!("  Resolved: {}", self.resolved);
        info!("  Failed: {}", self.failed);
        for (reason, count) in &self.failures_by_reason {
            if *count > 0 {
                info!("    {reason}: {count}");
            }
        }
        if self.strand_flipped > 0 {
            info!("  Strand-flipped: {}", self.strand_flipped);
        }
        info!("  Time elapsed: {:.2} seconds", self.duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::worker::PartitionTally;
    use crate::core::record::{ResolutionFailure, VariantRecord};

    fn partition_result(chromosome: &str, resolved: usize, failures: &[FailureReason]) -> PartitionResult {
        let mut tally = PartitionTally {
            total: resolved + failures.len(),
            resolved,
            ..PartitionTally::default()
        };
        let record = VariantRecord::new(chromosome, 1, "x", b'A', b'C');
        let mut outcomes = Vec::new();
        for reason in failures {
            *tally.failures.entry(*reason).or_insert(0) += 1;
            outcomes.push(Err(ResolutionFailure::new(&record, *reason, "")));
        }
        PartitionResult {
            chromosome: chromosome.to_string(),
            outcomes,
            tally,
            elapsed: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_report_aggregates_partitions() {
        let mut report = RunReport::new(Utc::now(), 2);
        report.add_partition(&partition_result(
            "chr1",
            3,
            &[FailureReason::AlleleMismatch, FailureReason::OutOfRangePosition],
        ));
        report.add_partition(&partition_result(
            "chr23",
            0,
            &[FailureReason::MissingChromosomeFile; 4],
        ));
        report.finish(Duration::from_secs(1));

        assert_eq!(report.total_records, 9);
        assert_eq!(report.resolved, 3);
        assert_eq!(report.failed, 6);
        assert_eq!(report.failures_for(FailureReason::MissingChromosomeFile), 4);
        assert_eq!(report.failures_for(FailureReason::ProcessingFault), 0);
        assert!(report.is_balanced());

        assert_eq!(report.chromosomes[0].partition_failure, None);
        assert_eq!(
            report.chromosomes[1].partition_failure,
            Some(FailureReason::MissingChromosomeFile)
        );
    }

    #[test]
    fn test_report_json_lists_all_reasons() {
        let report = RunReport::new(Utc::now(), 1);
        let json = serde_json::to_value(&report).unwrap();
        let reasons = json["failures_by_reason"].as_object().unwrap();
        assert_eq!(reasons.len(), FailureReason::ALL.len());
        assert_eq!(reasons["allele_mismatch"], 0);
    }
}
