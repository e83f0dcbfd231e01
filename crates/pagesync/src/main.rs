//! pagesync CLI - publish page trees to Confluence.
//!
//! Provides commands for:
//! - `upload`: Create, update and reconcile pages from a manifest
//! - `delete`: Delete a page and all of its descendants

mod commands;
mod error;
mod manifest;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DeleteArgs, UploadArgs};
use output::Output;

/// pagesync - Confluence page synchronization.
#[derive(Parser)]
#[command(name = "pagesync", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a page tree described by a manifest.
    Upload(UploadArgs),
    /// Delete a page and everything below it.
    Delete(DeleteArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Upload(args) => args.verbose,
        Commands::Delete(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Upload(args) => args.execute(),
        Commands::Delete(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
