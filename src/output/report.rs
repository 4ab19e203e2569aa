use std::io::Write;
use std::path::Path;

use crate::annotation::report::RunReport;
use crate::cli::OutputFormat;
use crate::output::{write_atomically, OutputError};

/// Atomically write the report as pretty JSON
///
/// # Errors
///
/// Returns `OutputError::Json` if serialization fails, or an IO error.
pub fn write_report_file(path: &Path, report: &RunReport) -> Result<(), OutputError> {
    write_atomically(path, |w| {
        serde_json::to_writer_pretty(&mut *w, report)?;
        writeln!(w)?;
        Ok(())
    })
}

/// Render the run summary in the requested format
///
/// # Errors
///
/// Returns `OutputError` on write or serialization failure.
pub fn render_report<W: Write + ?Sized>(
    writer: &mut W,
    report: &RunReport,
    format: OutputFormat,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Text => render_text(writer, report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)?;
        }
        OutputFormat::Tsv => render_tsv(writer, report)?,
    }
    Ok(())
}

fn render_text<W: Write + ?Sized>(w: &mut W, report: &RunReport) -> std::io::Result<()> {
    writeln!(w, "Annotation Summary")?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w, "  Total records:  {}", report.total_records)?;
    writeln!(w, "  Resolved:       {}", report.resolved)?;
    writeln!(w, "  Failed:         {}", report.failed)?;
    for (reason, count) in &report.failures_by_reason {
        if *count > 0 {
            writeln!(w, "    {reason}: {count}")?;
        }
    }
    if report.strand_flipped > 0 {
        writeln!(w, "  Strand-flipped: {}", report.strand_flipped)?;
    }
    writeln!(w, "  Workers:        {}", report.workers)?;
    writeln!(w, "  Elapsed:        {:.2}s", report.duration_secs)?;

    if !report.chromosomes.is_empty() {
        writeln!(w, "\n  {:<12} {:>10} {:>10} {:>10}", "chromosome", "records", "resolved", "failed")?;
        for c in &report.chromosomes {
            let note = c
                .partition_failure
                .map(|r| format!("  ({r})"))
                .unwrap_or_default();
            writeln!(
                w,
                "  {:<12} {:>10} {:>10} {:>10}{note}",
                c.chromosome, c.records, c.resolved, c.failed
            )?;
        }
    }
    Ok(())
}

fn render_tsv<W: Write + ?Sized>(w: &mut W, report: &RunReport) -> std::io::Result<()> {
    writeln!(w, "metric\tvalue")?;
    writeln!(w, "total_records\t{}", report.total_records)?;
    writeln!(w, "resolved\t{}", report.resolved)?;
    writeln!(w, "failed\t{}", report.failed)?;
    writeln!(w, "strand_flipped\t{}", report.strand_flipped)?;
    for (reason, count) in &report.failures_by_reason {
        writeln!(w, "failed.{reason}\t{count}")?;
    }
    writeln!(w, "duration_secs\t{:.3}", report.duration_secs)?;
    Ok(())
}
