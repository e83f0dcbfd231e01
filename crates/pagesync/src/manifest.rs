//! Upload manifest loading.
//!
//! The manifest is a JSON page tree written by the document converter:
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "title": "Guide",
//!       "body": "<p>...</p>",
//!       "labels": ["docs"],
//!       "attachments": [{"name": "arch.png", "path": "img/arch.png"}],
//!       "children": []
//!     }
//!   ]
//! }
//! ```
//!
//! Missing hashes are computed as hex SHA-256 of the body or file content.
//! Attachment paths are relative to the manifest file.

use std::path::{Path, PathBuf};

use pagesync_upload::{DesiredAttachment, PageNode};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Error loading a manifest.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct Manifest {
    pages: Vec<ManifestPage>,
}

#[derive(Debug, Deserialize)]
struct ManifestPage {
    title: String,
    body: String,
    #[serde(default)]
    hash: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    attachments: Vec<ManifestAttachment>,
    #[serde(default)]
    children: Vec<ManifestPage>,
}

#[derive(Debug, Deserialize)]
struct ManifestAttachment {
    name: String,
    path: PathBuf,
    #[serde(default)]
    hash: Option<String>,
}

/// Load the page tree from a manifest file.
pub(crate) fn load(path: &Path) -> Result<Vec<PageNode>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: Manifest =
        serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let base = path.parent().unwrap_or(Path::new(""));
    manifest
        .pages
        .into_iter()
        .map(|page| page.into_node(base))
        .collect()
}

impl ManifestPage {
    fn into_node(self, base: &Path) -> Result<PageNode, ManifestError> {
        let content_hash = self.hash.unwrap_or_else(|| sha256_hex(self.body.as_bytes()));
        let attachments = self
            .attachments
            .into_iter()
            .map(|a| a.into_desired(base))
            .collect::<Result<_, _>>()?;
        let children = self
            .children
            .into_iter()
            .map(|c| c.into_node(base))
            .collect::<Result<_, _>>()?;

        Ok(PageNode {
            title: self.title,
            body: self.body,
            content_hash,
            labels: self.labels,
            attachments,
            children,
        })
    }
}

impl ManifestAttachment {
    fn into_desired(self, base: &Path) -> Result<DesiredAttachment, ManifestError> {
        let resource_location = base.join(&self.path);
        let content_hash = match self.hash {
            Some(hash) => hash,
            None => {
                let data =
                    std::fs::read(&resource_location).map_err(|source| ManifestError::Read {
                        path: resource_location.clone(),
                        source,
                    })?;
                sha256_hex(&data)
            }
        };

        Ok(DesiredAttachment {
            name: self.name,
            content_hash,
            resource_location,
        })
    }
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
