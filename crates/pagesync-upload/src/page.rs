//! Desired and remote page state.

use std::path::PathBuf;

use pagesync_confluence::types::{Attachment, ConfluencePage, Label};

/// Locally rendered target state for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredPage {
    /// Page title, unique within the space.
    pub title: String,
    /// ID of the page to file this one under.
    pub parent_id: String,
    /// Target space key.
    pub space: String,
    /// Storage-format body.
    pub body: String,
    /// Digest of `body`.
    pub content_hash: String,
    /// Label names. Order is kept for the add call but ignored for comparison.
    pub labels: Vec<String>,
    /// Attachments.
    pub attachments: Vec<DesiredAttachment>,
}

/// Attachment a page should carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredAttachment {
    /// Attachment filename, the identity used for matching.
    pub name: String,
    /// Digest of the file content.
    pub content_hash: String,
    /// Local file holding the content.
    pub resource_location: PathBuf,
}

/// Remote page identity with the sub-resources needed for reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerPage {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Parent page ID.
    pub parent_id: String,
    /// Labels currently on the page.
    pub labels: Vec<Label>,
    /// Attachments currently on the page.
    pub attachments: Vec<Attachment>,
}

impl ServerPage {
    /// Snapshot a looked-up or newly created page.
    ///
    /// Missing label or attachment expansions count as empty.
    pub(crate) fn from_remote(page: &ConfluencePage, parent_id: &str) -> Self {
        Self {
            id: page.id.clone(),
            title: page.title.clone(),
            parent_id: parent_id.to_owned(),
            labels: page.labels().to_vec(),
            attachments: page.attachments().to_vec(),
        }
    }
}

/// What happened to the page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Page did not exist and was created.
    Created,
    /// Page existed with different content and was updated.
    Updated,
    /// Page existed with the same content.
    Unchanged,
}

/// Outcome of [`create_or_update_page_content`](crate::PageUploadOperations::create_or_update_page_content).
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSync {
    /// Remote page state before label and attachment reconciliation.
    pub page: ServerPage,
    /// Body action taken.
    pub action: PageAction,
}

/// Outcome of synchronizing one page.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncResult {
    /// Remote page identity.
    pub page: ServerPage,
    /// Body action taken.
    pub action: PageAction,
    /// Label names on the page after reconciliation.
    pub labels: Vec<String>,
    /// Attachment names on the page after reconciliation.
    pub attachments: Vec<String>,
}
