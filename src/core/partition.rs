use std::collections::HashMap;

use crate::core::record::VariantRecord;
use crate::core::types::{natural_key, ChromosomeOrder};

/// All records sharing one chromosome value, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromosomePartition {
    pub chromosome: String,
    pub records: Vec<VariantRecord>,
}

impl ChromosomePartition {
    pub fn new(chromosome: impl Into<String>) -> Self {
        Self {
            chromosome: chromosome.into(),
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only the first `max` records. Returns how many were dropped.
    pub fn truncate(&mut self, max: usize) -> usize {
        let dropped = self.records.len().saturating_sub(max);
        self.records.truncate(max);
        dropped
    }
}

/// Group records by chromosome in a single pass.
///
/// Partitions come out in first-seen order of their chromosome (or natural
/// order when requested); rows inside a partition keep their input order.
/// Concatenating the partitions yields every input record exactly once.
#[must_use]
pub fn partition_records(
    records: Vec<VariantRecord>,
    order: ChromosomeOrder,
) -> Vec<ChromosomePartition> {
    let mut partitions: Vec<ChromosomePartition> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for record in records {
        let idx = match index_of.get(record.chromosome.as_str()) {
            Some(&idx) => idx,
            None => {
                let idx = partitions.len();
                index_of.insert(record.chromosome.clone(), idx);
                partitions.push(ChromosomePartition::new(record.chromosome.clone()));
                idx
            }
        };
        partitions[idx].records.push(record);
    }

    if order == ChromosomeOrder::Natural {
        // Stable sort: chromosomes with equal keys keep first-seen order
        partitions.sort_by(|a, b| natural_key(&a.chromosome).cmp(&natural_key(&b.chromosome)));
    }

    partitions
}
