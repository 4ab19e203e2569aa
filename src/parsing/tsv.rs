//! Reader for the two-allele input table.
//!
//! Format (tab-separated, header required):
//!
//! ```text
//! #CHROM	POS	ID	allele1	allele2
//! chr1	1000	rs123	A	T
//! ```
//!
//! Gzip/bgzip compressed files are decompressed transparently. CRLF line
//! endings and blank lines are tolerated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::core::record::VariantRecord;

/// Expected header columns, in order
pub const INPUT_COLUMNS: [&str; 5] = ["#CHROM", "POS", "ID", "allele1", "allele2"];

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file is empty (no header line)")]
    MissingHeader,

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open the input table, decompressing if needed
///
/// # Errors
///
/// Returns `InputError::Io` if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>, InputError> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Validate the header line of the input table.
///
/// The header must have exactly the columns in [`INPUT_COLUMNS`], in order.
///
/// # Errors
///
/// Returns `InputError::InvalidHeader` describing the column count or every
/// mismatched column.
pub fn validate_header(header: &str) -> Result<(), InputError> {
    let actual: Vec<&str> = header.trim_end_matches(['\r', '\n']).split('\t').collect();

    if actual.len() != INPUT_COLUMNS.len() {
        return Err(InputError::InvalidHeader(format!(
            "header has {} columns, expected {} ({})",
            actual.len(),
            INPUT_COLUMNS.len(),
            INPUT_COLUMNS.join(" ")
        )));
    }

    let mismatches: Vec<String> = INPUT_COLUMNS
        .iter()
        .zip(&actual)
        .enumerate()
        .filter(|(_, (expected, got))| *expected != *got)
        .map(|(i, (expected, got))| format!("column {}: expected '{expected}', got '{got}'", i + 1))
        .collect();

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(InputError::InvalidHeader(mismatches.join("; ")))
    }
}

/// Read only the header line of the input table
///
/// # Errors
///
/// Returns `InputError::Io` on read failure or `InputError::MissingHeader`
/// if the file is empty.
pub fn read_header_line(path: &Path) -> Result<String, InputError> {
    let mut reader = open_input(path)?;
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(InputError::MissingHeader);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Parse the whole input table from a file
///
/// # Errors
///
/// See [`parse_records`].
pub fn read_records(path: &Path, check_header: bool) -> Result<Vec<VariantRecord>, InputError> {
    parse_records(open_input(path)?, check_header)
}

/// Parse the input table from any buffered reader.
///
/// The first line is always the header; it is validated when `check_header`
/// is set and skipped otherwise.
///
/// # Errors
///
/// Returns `InputError::MissingHeader` for empty input, `InputError::InvalidHeader`
/// for a bad header, or `InputError::InvalidRecord` (with a 1-based line number)
/// for a row that cannot be parsed.
pub fn parse_records<R: BufRead>(
    reader: R,
    check_header: bool,
) -> Result<Vec<VariantRecord>, InputError> {
    let mut lines = reader.lines();

    let header = lines.next().ok_or(InputError::MissingHeader)??;
    if check_header {
        validate_header(&header)?;
    }

    let mut records = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        // Header is line 1
        let line_num = i + 2;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(line, line_num)?);
    }

    Ok(records)
}

fn parse_line(line: &str, line_num: usize) -> Result<VariantRecord, InputError> {
    let invalid = |message: String| InputError::InvalidRecord {
        line: line_num,
        message,
    };

    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() != INPUT_COLUMNS.len() {
        return Err(invalid(format!(
            "expected {} tab-separated fields, found {}",
            INPUT_COLUMNS.len(),
            fields.len()
        )));
    }

    let chromosome = fields[0];
    if chromosome.is_empty() {
        return Err(invalid("empty chromosome".to_string()));
    }

    let position: u64 = fields[1]
        .parse()
        .map_err(|_| invalid(format!("invalid position '{}'", fields[1])))?;
    if position == 0 {
        return Err(invalid("position must be >= 1 (positions are 1-based)".to_string()));
    }

    let allele1 = parse_allele(fields[3]).ok_or_else(|| {
        invalid(format!("allele1 '{}' is not a single base", fields[3]))
    })?;
    let allele2 = parse_allele(fields[4]).ok_or_else(|| {
        invalid(format!("allele2 '{}' is not a single base", fields[4]))
    })?;

    Ok(VariantRecord::new(chromosome, position, fields[2], allele1, allele2))
}

fn parse_allele(field: &str) -> Option<u8> {
    match field.as_bytes() {
        [b] if b.is_ascii_alphabetic() => Some(*b),
        _ => None,
    }
}
