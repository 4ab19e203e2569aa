use std::io::Write;
use std::path::Path;

use crate::core::record::{ResolutionFailure, ResolvedRecord};
use crate::output::{write_atomically, OutputError};

/// Header of the REF/ALT table
pub const OUTPUT_HEADER: &str = "#CHROM\tPOS\tID\tREF\tALT";

/// Header of the failure table
pub const FAILURE_HEADER: &str = "#CHROM\tPOS\tID\tallele1\tallele2\treason\tdetail";

/// Write resolved records as `#CHROM POS ID REF ALT`
///
/// # Errors
///
/// Returns `OutputError::Io` on write failure.
pub fn write_resolved<W: Write + ?Sized>(
    writer: &mut W,
    records: &[ResolvedRecord],
) -> Result<(), OutputError> {
    writeln!(writer, "{OUTPUT_HEADER}")?;
    for r in records {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            r.chromosome,
            r.position,
            r.id,
            char::from(r.reference),
            char::from(r.alternate)
        )?;
    }
    Ok(())
}

/// Write failed records with their reason and detail
///
/// # Errors
///
/// Returns `OutputError::Io` on write failure.
pub fn write_failures<W: Write + ?Sized>(
    writer: &mut W,
    failures: &[ResolutionFailure],
) -> Result<(), OutputError> {
    writeln!(writer, "{FAILURE_HEADER}")?;
    for f in failures {
        // Detail is free text; keep the table rectangular
        let detail = f.detail.replace(['\t', '\n', '\r'], " ");
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{detail}",
            f.chromosome,
            f.position,
            f.id,
            char::from(f.allele1),
            char::from(f.allele2),
            f.reason,
        )?;
    }
    Ok(())
}

/// Atomically write the REF/ALT table to `path`
///
/// # Errors
///
/// See [`write_atomically`].
pub fn write_resolved_file(path: &Path, records: &[ResolvedRecord]) -> Result<(), OutputError> {
    write_atomically(path, |w| write_resolved(w, records))
}

/// Atomically write the failure table to `path`
///
/// # Errors
///
/// See [`write_atomically`].
pub fn write_failures_file(path: &Path, failures: &[ResolutionFailure]) -> Result<(), OutputError> {
    write_atomically(path, |w| write_failures(w, failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::VariantRecord;
    use crate::core::types::FailureReason;

    #[test]
    fn test_write_resolved() {
        let record = VariantRecord::new("chr1", 1000, "rs123", b'a', b'T');
        let resolved = ResolvedRecord::new(&record, b'A', b'T', false);

        let mut buf = Vec::new();
        write_resolved(&mut buf, &[resolved]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "#CHROM\tPOS\tID\tREF\tALT\nchr1\t1000\trs123\tA\tT\n"
        );
    }

    #[test]
    fn test_write_failures_sanitizes_detail() {
        let record = VariantRecord::new("chr1", 1000, "rs124", b'G', b'T');
        let failure =
            ResolutionFailure::new(&record, FailureReason::AlleleMismatch, "line one\tline\ntwo");

        let mut buf = Vec::new();
        write_failures(&mut buf, &[failure]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "chr1\t1000\trs124\tG\tT\tAlleleMismatch\tline one line two");
    }

    #[test]
    fn test_empty_output_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        write_resolved_file(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), format!("{OUTPUT_HEADER}\n"));
    }
}
