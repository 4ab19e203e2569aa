//! Readers for the annotation inputs.
//!
//! This module provides parsers for:
//!
//! - **Two-allele input table**: `#CHROM POS ID allele1 allele2` TSV, plain or gzipped
//! - **FASTA index (.fai) files**: Sequence names and lengths via noodles
//! - **FASTA file names**: Which files in a directory serve which chromosome
//!
//! ## Example
//!
//! ```rust,no_run
//! use variant_annotator::parsing::tsv::read_records;
//! use std::path::Path;
//!
//! let records = read_records(Path::new("panel.tsv"), true).unwrap();
//! println!("{} records", records.len());
//! ```

pub mod fai;
pub mod fasta;
pub mod tsv;
