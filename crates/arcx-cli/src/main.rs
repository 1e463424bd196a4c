//! Arcx CLI - Command-line utility for extracting archives and rasterizing
//! PDF documents.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let pdfium_lib = cli.pdfium_lib.as_deref();

    match &cli.command {
        cli::Commands::Probe(args) => commands::probe::execute(args, pdfium_lib, &*formatter),
        cli::Commands::Extract(args) => commands::extract::execute(args, pdfium_lib, &*formatter),
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    }
}
