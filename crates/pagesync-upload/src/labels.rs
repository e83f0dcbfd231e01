//! Label reconciliation.

use pagesync_confluence::ConfluenceApi;
use pagesync_confluence::types::Label;
use tracing::debug;

use crate::error::UploadError;
use crate::operations::PageUploadOperations;
use crate::page::{DesiredPage, ServerPage};

/// Label calls needed to turn the remote set into the desired set.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LabelChanges {
    /// Desired names missing remotely, in desired order.
    pub to_add: Vec<String>,
    /// Remote names not desired, in remote order.
    pub to_delete: Vec<String>,
}

impl LabelChanges {
    /// Compare label sets by name.
    pub fn compute(remote: &[Label], desired: &[String]) -> Self {
        let mut changes = Self::default();
        for name in desired {
            if !remote.iter().any(|l| &l.name == name) && !changes.to_add.contains(name) {
                changes.to_add.push(name.clone());
            }
        }
        for label in remote {
            if !desired.contains(&label.name) && !changes.to_delete.contains(&label.name) {
                changes.to_delete.push(label.name.clone());
            }
        }
        changes
    }

    /// Whether no calls are needed.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_delete.is_empty()
    }
}

impl<A: ConfluenceApi> PageUploadOperations<'_, A> {
    /// Make the page's labels match `desired.labels`.
    ///
    /// Additions go out in one call, deletions one call per label.
    ///
    /// # Errors
    ///
    /// Returns the first gateway error.
    pub fn update_page_labels(
        &self,
        server_page: &ServerPage,
        desired: &DesiredPage,
    ) -> Result<(), UploadError> {
        let changes = LabelChanges::compute(&server_page.labels, &desired.labels);
        if changes.is_empty() {
            debug!("Labels of page {} are up to date", server_page.id);
            return Ok(());
        }

        if !changes.to_add.is_empty() {
            self.api.add_labels(&server_page.id, &changes.to_add)?;
        }
        for name in &changes.to_delete {
            self.api.delete_label(&server_page.id, name)?;
        }
        Ok(())
    }
}
