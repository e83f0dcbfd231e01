//! `pagesync delete` command implementation.

use std::path::PathBuf;

use clap::Args;
use pagesync_config::Config;
use pagesync_confluence::ConfluenceClient;
use pagesync_upload::{PageUploadOperations, UploadConfig};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the delete command.
#[derive(Args)]
pub(crate) struct DeleteArgs {
    /// ID of the page to delete together with all its descendants.
    page_id: String,

    /// Path to configuration file (default: auto-discover pagesync.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl DeleteArgs {
    /// Execute the delete command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or any deletion fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let client = ConfluenceClient::from_config(config.require_confluence()?);
        let ops = PageUploadOperations::new(&client, UploadConfig::from_settings(&config.upload));

        output.info(&format!("Deleting page {} and its children...", self.page_id));
        ops.delete_page_with_children(&self.page_id)?;
        output.success(&format!("Deleted page {}", self.page_id));
        Ok(())
    }
}
