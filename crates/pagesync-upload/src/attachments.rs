//! Attachment reconciliation.
//!
//! Remote attachments are matched to desired ones by name. The content hash
//! of an uploaded file is kept as a `HASH:<value>` token inside the
//! attachment comment, since Confluence has no structured field for it.

use std::collections::HashSet;

use pagesync_confluence::ConfluenceApi;
use pagesync_confluence::types::{Attachment, PageAttachmentInput};
use tracing::debug;

use crate::content_type::content_type;
use crate::error::UploadError;
use crate::operations::PageUploadOperations;
use crate::page::{DesiredAttachment, DesiredPage, ServerPage};

/// Comment carrying a content hash.
pub fn hash_comment(hash: &str) -> String {
    format!("HASH:{hash}")
}

/// Whether the attachment comment carries `hash` anywhere in its text.
pub fn has_hash(attachment: &Attachment, hash: &str) -> bool {
    attachment
        .comment()
        .is_some_and(|comment| comment.contains(&hash_comment(hash)))
}

/// Attachment calls needed to turn the remote set into the desired set.
#[derive(Debug, Default, PartialEq)]
pub struct AttachmentChanges<'a> {
    /// Desired attachments with no remote counterpart.
    pub to_add: Vec<&'a DesiredAttachment>,
    /// Remote attachment ID and the desired content replacing it.
    pub to_update: Vec<(&'a str, &'a DesiredAttachment)>,
    /// Remote attachments no longer desired.
    pub to_delete: Vec<&'a Attachment>,
}

impl<'a> AttachmentChanges<'a> {
    /// Compare attachment sets by name and embedded hash.
    ///
    /// A name listed more than once in `desired` is taken from its first
    /// occurrence.
    pub fn compute(remote: &'a [Attachment], desired: &'a [DesiredAttachment]) -> Self {
        let mut changes = Self::default();
        let mut seen = HashSet::new();
        for attachment in desired {
            if !seen.insert(attachment.name.as_str()) {
                continue;
            }
            match remote.iter().find(|r| r.title == attachment.name) {
                None => changes.to_add.push(attachment),
                Some(existing) if !has_hash(existing, &attachment.content_hash) => {
                    changes.to_update.push((existing.id.as_str(), attachment));
                }
                Some(_) => {}
            }
        }
        changes.to_delete = remote
            .iter()
            .filter(|r| !desired.iter().any(|d| d.name == r.title))
            .collect();
        changes
    }

    /// Whether no calls are needed.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// Upload request for a desired attachment.
fn upload_input(attachment: &DesiredAttachment) -> PageAttachmentInput {
    PageAttachmentInput {
        name: attachment.name.clone(),
        content: attachment.resource_location.clone(),
        comment: Some(hash_comment(&attachment.content_hash)),
        content_type: content_type(&attachment.resource_location).map(str::to_owned),
    }
}

impl<A: ConfluenceApi> PageUploadOperations<'_, A> {
    /// Make the page's attachments match `desired.attachments`.
    ///
    /// Orphans are deleted one by one, changed files re-uploaded one by one,
    /// then new files uploaded in a single call.
    ///
    /// # Errors
    ///
    /// Returns the first gateway error.
    pub fn update_page_attachments(
        &self,
        server_page: &ServerPage,
        desired: &DesiredPage,
    ) -> Result<(), UploadError> {
        let changes = AttachmentChanges::compute(&server_page.attachments, &desired.attachments);
        if changes.is_empty() {
            debug!("Attachments of page {} are up to date", server_page.id);
            return Ok(());
        }

        for orphan in &changes.to_delete {
            debug!("Deleting attachment '{}' ({})", orphan.title, orphan.id);
            self.api.delete_attachment(&orphan.id)?;
        }
        for (attachment_id, attachment) in &changes.to_update {
            debug!("Updating attachment '{}' ({})", attachment.name, attachment_id);
            self.api
                .update_attachment(&server_page.id, attachment_id, &upload_input(attachment))?;
        }
        if !changes.to_add.is_empty() {
            let inputs: Vec<_> = changes.to_add.iter().map(|a| upload_input(a)).collect();
            self.api.add_attachments(&server_page.id, &inputs)?;
        }
        Ok(())
    }
}
