use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::annotation::{AnnotateConfig, AnnotationEngine, AnnotationRun, ResolverOptions};
use crate::cli::OutputFormat;
use crate::core::types::ChromosomeOrder;
use crate::output::report::{render_report, write_report_file};
use crate::output::tsv::{write_failures_file, write_resolved_file};
use crate::parsing::tsv::read_records;
use crate::reference::ReferenceDirectory;
use crate::utils::validation::{
    preflight, validate_input, validate_output, validate_reference_directory,
};

#[derive(Args)]
pub struct AnnotateArgs {
    /// Input TSV (columns: #CHROM POS ID allele1 allele2), optionally gzipped
    #[arg(short, long, required = true)]
    pub input: PathBuf,

    /// Output TSV (columns: #CHROM POS ID REF ALT)
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Directory with indexed reference chromosomes (chr1.fa + chr1.fa.fai, ...)
    #[arg(short = 'd', long, required = true)]
    pub ref_dir: PathBuf,

    /// Number of parallel workers (default: available parallelism)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub processes: Option<u32>,

    /// Failure table (default: <output>.failures.tsv)
    #[arg(long)]
    pub failures: Option<PathBuf>,

    /// Write the run report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Skip input header validation (the first line is still skipped)
    #[arg(long)]
    pub skip_header_check: bool,

    /// Only process the first N records of each chromosome (for testing)
    #[arg(long)]
    pub max_variants_per_chrom: Option<usize>,

    /// Order of chromosomes in the output
    #[arg(long, value_enum, default_value = "input")]
    pub chromosome_order: ChromosomeOrder,

    /// When neither allele matches the reference, retry on the opposite strand
    #[arg(long)]
    pub allow_strand_flip: bool,

    /// Only validate inputs and exit without processing
    #[arg(long)]
    pub validate_only: bool,
}

impl AnnotateArgs {
    fn failures_path(&self) -> PathBuf {
        self.failures
            .clone()
            .unwrap_or_else(|| default_failures_path(&self.output))
    }
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if pre-flight validation fails, the input cannot be
/// parsed, the run is interrupted, or an output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let check_header = !args.skip_header_check;

    if args.validate_only {
        return run_validation(&args, check_header);
    }

    info!("Starting variant annotation");
    let references = preflight(&args.input, &args.output, &args.ref_dir, check_header)
        .context("Pre-flight validation failed")?;

    let config = AnnotateConfig {
        workers: effective_processes(args.processes, crate::annotation::engine::host_parallelism()),
        chromosome_order: args.chromosome_order,
        max_records_per_chromosome: args.max_variants_per_chrom,
        resolver: ResolverOptions {
            allow_strand_flip: args.allow_strand_flip,
        },
    };

    // Build tokio runtime for signal handling around the blocking run
    let rt = tokio::runtime::Runtime::new()?;
    let run = rt.block_on(run_until_interrupted(
        args.input.clone(),
        check_header,
        references,
        config,
    ))?;

    write_resolved_file(&args.output, &run.resolved)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Saved {} records to {}", run.resolved.len(), args.output.display());

    let failures_path = args.failures_path();
    write_failures_file(&failures_path, &run.failures)
        .with_context(|| format!("Failed to write {}", failures_path.display()))?;
    if !run.failures.is_empty() {
        info!(
            "Saved {} failed records to {}",
            run.failures.len(),
            failures_path.display()
        );
    }

    if let Some(path) = &args.report {
        write_report_file(path, &run.report)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    run.report.log_summary();
    render_report(&mut io::stdout().lock(), &run.report, format)?;

    Ok(())
}

fn run_validation(args: &AnnotateArgs, check_header: bool) -> anyhow::Result<()> {
    validate_input(&args.input, check_header)?;
    validate_output(&args.output)?;
    let references = validate_reference_directory(&args.ref_dir)?;
    eprintln!(
        "Validation successful - input appears valid ({} reference chromosome(s))",
        references.len()
    );
    Ok(())
}

/// Parse the input and run the engine on a blocking thread while Ctrl-C
/// cancels in-flight partitions.
async fn run_until_interrupted(
    input: PathBuf,
    check_header: bool,
    references: ReferenceDirectory,
    config: AnnotateConfig,
) -> anyhow::Result<AnnotationRun> {
    let cancel = Arc::new(AtomicBool::new(false));

    let signal_cancel = Arc::clone(&cancel);
    let listener = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, abandoning in-flight chromosomes");
            signal_cancel.store(true, Ordering::Relaxed);
        }
    });

    let worker_cancel = Arc::clone(&cancel);
    let task = tokio::task::spawn_blocking(move || -> anyhow::Result<AnnotationRun> {
        let records = read_records(&input, check_header)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        info!("Read {} records from {}", records.len(), input.display());

        let engine = AnnotationEngine::new(&references, config);
        Ok(engine.run(records, &worker_cancel)?)
    });

    let result = task.await.context("Annotation task failed")?;
    listener.abort();

    result.context(interrupted_hint(&cancel))
}

fn interrupted_hint(cancel: &AtomicBool) -> &'static str {
    if cancel.load(Ordering::Relaxed) {
        "Interrupted: no output was written"
    } else {
        "Annotation failed"
    }
}

/// Apply the host default and cap the worker count at twice the host parallelism
fn effective_processes(requested: Option<u32>, host: usize) -> usize {
    let limit = host.saturating_mul(2).max(1);
    match requested {
        None => host.max(1),
        Some(n) => {
            let n = n as usize;
            if n > limit {
                warn!("Reducing processes from {n} to system limit {limit}");
                limit
            } else {
                n
            }
        }
    }
}

fn default_failures_path(output: &Path) -> PathBuf {
    let mut s = output.as_os_str().to_os_string();
    s.push(".failures.tsv");
    PathBuf::from(s)
}
