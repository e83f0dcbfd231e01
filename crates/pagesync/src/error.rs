//! CLI error types.

use pagesync_config::ConfigError;
use pagesync_upload::UploadError;

use crate::manifest::ManifestError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("{0}")]
    Failed(String),
}
