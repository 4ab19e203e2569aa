//! Command-line interface for variant-annotator.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **annotate**: Convert a `#CHROM POS ID allele1 allele2` table to
//!   `#CHROM POS ID REF ALT` using a directory of indexed per-chromosome FASTA files
//!
//! ## Usage
//!
//! ```text
//! # Annotate with one worker per core
//! variant-annotator annotate -i panel.tsv -o annotated.tsv -d refs/
//!
//! # Eight workers, debug log to a file, JSON summary on stdout
//! variant-annotator --log-file logs/annotation.log --format json \
//!     annotate -i panel.tsv -o annotated.tsv -d refs/ -p 8
//!
//! # Only check the header and the reference directory
//! variant-annotator annotate -i panel.tsv -o annotated.tsv -d refs/ --validate-only
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod annotate;

#[derive(Parser)]
#[command(name = "variant-annotator")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Convert two-allele SNP panels to REF/ALT using an indexed reference")]
#[command(
    long_about = "variant-annotator reads a fingerprinting panel listing two alleles per SNP (allele1, allele2) and decides which one is the reference base by looking up each position in a directory of per-chromosome indexed FASTA files.\n\nChromosomes are processed in parallel. Records that cannot be resolved are written to a separate failure table with the reason."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging on the console)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Format of the run summary printed to stdout
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Console log level
    #[arg(long, global = true, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Also write the log to this file (directories are created)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level for the log file
    #[arg(long, global = true, value_enum, default_value = "debug")]
    pub log_file_level: LogLevel,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assign REF/ALT to every record of a two-allele table
    Annotate(annotate::AnnotateArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Filter applying this level to the crate, keeping dependencies at warn
    #[must_use]
    pub fn filter(self) -> EnvFilter {
        EnvFilter::new(format!("variant_annotator={},warn", self.as_str()))
    }
}
