use serde::{Deserialize, Serialize};

use crate::core::types::FailureReason;

/// One row of the two-allele input table (`#CHROM POS ID allele1 allele2`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Chromosome name as written in the input (e.g. `chr1`)
    pub chromosome: String,

    /// 1-based position, always >= 1
    pub position: u64,

    /// Variant identifier (e.g. an rsID); not required to be unique
    pub id: String,

    /// First candidate allele, a single ASCII letter as written in the input
    pub allele1: u8,

    /// Second candidate allele
    pub allele2: u8,
}

impl VariantRecord {
    pub fn new(
        chromosome: impl Into<String>,
        position: u64,
        id: impl Into<String>,
        allele1: u8,
        allele2: u8,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            id: id.into(),
            allele1,
            allele2,
        }
    }

    /// Human-readable locus, e.g. `chr1:1000`
    #[must_use]
    pub fn locus(&self) -> String {
        format!("{}:{}", self.chromosome, self.position)
    }
}

/// A record with its REF and ALT assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    pub chromosome: String,
    pub position: u64,
    pub id: String,

    /// Allele matching the reference base (uppercase)
    pub reference: u8,

    /// The other allele (uppercase)
    pub alternate: u8,

    /// Alleles were complemented to match the reference strand
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub strand_flipped: bool,
}

impl ResolvedRecord {
    pub fn new(record: &VariantRecord, reference: u8, alternate: u8, strand_flipped: bool) -> Self {
        Self {
            chromosome: record.chromosome.clone(),
            position: record.position,
            id: record.id.clone(),
            reference,
            alternate,
            strand_flipped,
        }
    }
}

/// A record that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    pub chromosome: String,
    pub position: u64,
    pub id: String,
    pub allele1: u8,
    pub allele2: u8,
    pub reason: FailureReason,

    /// Free-text diagnostic for logs and the failure table
    pub detail: String,
}

impl ResolutionFailure {
    pub fn new(record: &VariantRecord, reason: FailureReason, detail: impl Into<String>) -> Self {
        Self {
            chromosome: record.chromosome.clone(),
            position: record.position,
            id: record.id.clone(),
            allele1: record.allele1,
            allele2: record.allele2,
            reason,
            detail: detail.into(),
        }
    }
}

/// Per-record result: exactly one of these exists for every input record
pub type RecordOutcome = Result<ResolvedRecord, ResolutionFailure>;
