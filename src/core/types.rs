use serde::{Deserialize, Serialize};

/// Why a record could not be converted to REF/ALT
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The reference returned no base, or an ambiguous one such as `N`
    NoReferenceBase,
    /// Neither allele equals the reference base
    AlleleMismatch,
    /// Both alleles equal the reference base, so there is no ALT to report
    ReferenceOnlyAlleles,
    /// No usable sequence/index pair for the chromosome (fails the whole partition)
    MissingChromosomeFile,
    /// Position is past the end of the chromosome
    OutOfRangePosition,
    /// Resolving the record panicked; the rest of the partition continued
    ProcessingFault,
}

impl FailureReason {
    pub const ALL: [FailureReason; 6] = [
        Self::NoReferenceBase,
        Self::AlleleMismatch,
        Self::ReferenceOnlyAlleles,
        Self::MissingChromosomeFile,
        Self::OutOfRangePosition,
        Self::ProcessingFault,
    ];

    /// Stable name used in the failure table and TSV report
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoReferenceBase => "NoReferenceBase",
            Self::AlleleMismatch => "AlleleMismatch",
            Self::ReferenceOnlyAlleles => "ReferenceOnlyAlleles",
            Self::MissingChromosomeFile => "MissingChromosomeFile",
            Self::OutOfRangePosition => "OutOfRangePosition",
            Self::ProcessingFault => "ProcessingFault",
        }
    }

    /// True when this reason is raised once for a whole partition
    #[must_use]
    pub fn is_partition_fatal(self) -> bool {
        matches!(self, Self::MissingChromosomeFile)
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order in which chromosome partitions are scheduled and emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ChromosomeOrder {
    /// First-seen order of chromosome values in the input
    #[default]
    Input,
    /// Natural order: chr1, chr2, ..., chr10, chrX
    Natural,
}

/// Sort key that compares embedded digit runs numerically.
///
/// `chr2` sorts before `chr10`, and names without digits sort by text.
#[must_use]
pub fn natural_key(name: &str) -> Vec<NaturalChunk<'_>> {
    let mut chunks = Vec::new();
    let bytes = name.as_bytes();
    let mut start = 0;

    while start < bytes.len() {
        let is_digit = bytes[start].is_ascii_digit();
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() == is_digit {
            end += 1;
        }
        let chunk = &name[start..end];
        if is_digit {
            // Leading zeros do not change the numeric value; fall back to text on overflow
            match chunk.parse::<u64>() {
                Ok(n) => chunks.push(NaturalChunk::Number(n)),
                Err(_) => chunks.push(NaturalChunk::Text(chunk)),
            }
        } else {
            chunks.push(NaturalChunk::Text(chunk));
        }
        start = end;
    }

    chunks
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum NaturalChunk<'a> {
    Number(u64),
    Text(&'a str),
}
