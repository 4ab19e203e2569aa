use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::prelude::*;

use variant_annotator::cli::{self, LogLevel};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    init_logging(&cli)?;

    match cli.command {
        cli::Commands::Annotate(args) => {
            cli::annotate::run(args, cli.format)?;
        }
    }

    Ok(())
}

/// Console logging on stderr, plus an optional uncoloured file sink
fn init_logging(cli: &cli::Cli) -> anyhow::Result<()> {
    let console_level = if cli.verbose {
        LogLevel::Debug
    } else {
        cli.log_level
    };

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level.filter());

    let file = match &cli.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_thread_names(true)
                    .with_filter(cli.log_file_level.filter()),
            )
        }
        None => None,
    };

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(())
}
