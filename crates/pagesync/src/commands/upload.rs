//! `pagesync upload` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use pagesync_config::{ChangeDetectorKind, CliSettings, Config, OrphanPolicy};
use pagesync_confluence::ConfluenceClient;
use pagesync_upload::{PageAction, PageUploadOperations, UploadConfig, UploadReport};

use crate::error::CliError;
use crate::manifest;
use crate::output::Output;

/// Arguments for the upload command.
#[derive(Args)]
pub(crate) struct UploadArgs {
    /// Path to the page manifest (JSON).
    manifest: PathBuf,

    /// Target space key (overrides config).
    #[arg(short, long, env = "PAGESYNC_SPACE")]
    space: Option<String>,

    /// ID of the page to upload under (overrides config).
    #[arg(short, long, env = "PAGESYNC_PARENT_ID")]
    parent_id: Option<String>,

    /// Version message for created and updated pages (empty for none).
    #[arg(short, long)]
    message: Option<String>,

    /// Notify page watchers about updates.
    #[arg(long)]
    notify_watchers: bool,

    /// How to detect changed pages.
    #[arg(long, value_enum)]
    change_detector: Option<DetectorArg>,

    /// Which pages missing from the manifest to delete.
    #[arg(long, value_enum)]
    remove_orphans: Option<OrphansArg>,

    /// Path to configuration file (default: auto-discover pagesync.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DetectorArg {
    /// Compare the stored content hash.
    Hash,
    /// Compare the stored page body.
    Content,
}

impl From<DetectorArg> for ChangeDetectorKind {
    fn from(arg: DetectorArg) -> Self {
        match arg {
            DetectorArg::Hash => Self::Hash,
            DetectorArg::Content => Self::Content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OrphansArg {
    /// Keep every page.
    None,
    /// Delete pages published by pagesync.
    Managed,
    /// Delete every page.
    All,
}

impl From<OrphansArg> for OrphanPolicy {
    fn from(arg: OrphansArg) -> Self {
        match arg {
            OrphansArg::None => Self::None,
            OrphansArg::Managed => Self::Managed,
            OrphansArg::All => Self::All,
        }
    }
}

impl UploadArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            space: self.space.clone(),
            parent_id: self.parent_id.clone(),
            change_message: self.message.clone(),
            notify_watchers: self.notify_watchers.then_some(true),
            change_detector: self.change_detector.map(Into::into),
            remove_orphans: self.remove_orphans.map(Into::into),
        }
    }

    /// Execute the upload command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the manifest is invalid, or if
    /// any page failed to upload.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let confluence = config.require_confluence()?;
        let (space, parent_id) = config.require_upload_target()?;

        let nodes = manifest::load(&self.manifest)?;
        output.info(&format!(
            "Uploading {} to space {space} under page {parent_id}...",
            self.manifest.display()
        ));

        let client = ConfluenceClient::from_config(confluence);
        let ops = PageUploadOperations::new(&client, UploadConfig::from_settings(&config.upload));
        let report = ops.upload_tree(&nodes, space, parent_id);

        print_report(&output, &report);

        if report.is_success() {
            Ok(())
        } else {
            Err(CliError::Failed(format!(
                "{} page(s) failed, {} skipped",
                report.failed.len(),
                report.skipped.len()
            )))
        }
    }
}

fn print_report(output: &Output, report: &UploadReport) {
    for result in &report.synced {
        let line = format!("{} ({})", result.page.title, result.page.id);
        match result.action {
            PageAction::Created => output.success(&format!("  + {line}")),
            PageAction::Updated => output.success(&format!("  ~ {line}")),
            PageAction::Unchanged => output.detail(&format!("  = {line}")),
        }
    }
    for title in &report.removed {
        output.warning(&format!("  - {title}"));
    }
    for failure in &report.failed {
        output.error(&format!("  ! {}: {}", failure.title, failure.error));
    }
    for title in &report.skipped {
        output.detail(&format!("  ? {title} (skipped)"));
    }

    let count = |action| report.synced.iter().filter(|r| r.action == action).count();
    output.info(&format!(
        "\n{} created, {} updated, {} unchanged, {} removed, {} failed",
        count(PageAction::Created),
        count(PageAction::Updated),
        count(PageAction::Unchanged),
        report.removed.len(),
        report.failed.len()
    ));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_arg_conversions() {
        assert_eq!(
            ChangeDetectorKind::from(DetectorArg::Content),
            ChangeDetectorKind::Content
        );
        assert_eq!(OrphanPolicy::from(OrphansArg::Managed), OrphanPolicy::Managed);
    }

    #[test]
    fn test_unset_flags_do_not_override() {
        let args = UploadArgs {
            manifest: PathBuf::from("manifest.json"),
            space: None,
            parent_id: Some("42".to_owned()),
            message: None,
            notify_watchers: false,
            change_detector: None,
            remove_orphans: Some(OrphansArg::All),
            config: None,
            verbose: false,
        };

        let settings = args.cli_settings();

        assert_eq!(settings.space, None);
        assert_eq!(settings.parent_id.as_deref(), Some("42"));
        assert_eq!(settings.notify_watchers, None);
        assert_eq!(settings.change_detector, None);
        assert_eq!(settings.remove_orphans, Some(OrphanPolicy::All));
    }
}
