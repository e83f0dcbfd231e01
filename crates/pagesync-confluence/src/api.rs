//! Remote page gateway abstraction.
//!
//! [`ConfluenceApi`] is the narrow set of calls the upload engine makes.
//! [`ConfluenceClient`](crate::ConfluenceClient) implements it over HTTP;
//! `MockConfluence` (behind the `mock` feature) implements it in memory.

use crate::error::ConfluenceError;
use crate::types::{
    Attachment, ConfluencePage, PageAttachmentInput, PageContentInput, PagePropertyInput,
    PageUpdateOptions,
};

/// Blocking Confluence content operations.
///
/// Implementations must be shareable across the rayon pool.
pub trait ConfluenceApi: Send + Sync {
    /// Find pages in `space` with exactly this `title`.
    ///
    /// Returns every match; callers decide what more than one match means.
    fn find_pages(
        &self,
        space: &str,
        title: &str,
        expansions: &[&str],
    ) -> Result<Vec<ConfluencePage>, ConfluenceError>;

    /// Create a page. `value.space` must be set.
    fn create_page(
        &self,
        value: &PageContentInput,
        options: &PageUpdateOptions,
        expansions: &[&str],
    ) -> Result<ConfluencePage, ConfluenceError>;

    /// Replace the body and title of an existing page.
    ///
    /// `value.version` must be the current version plus one.
    fn update_page(
        &self,
        page_id: &str,
        value: &PageContentInput,
        options: &PageUpdateOptions,
    ) -> Result<ConfluencePage, ConfluenceError>;

    /// Create or overwrite a page property.
    fn set_page_property(
        &self,
        page_id: &str,
        name: &str,
        value: &PagePropertyInput,
    ) -> Result<(), ConfluenceError>;

    /// Attach labels to a page in one call.
    fn add_labels(&self, page_id: &str, labels: &[String]) -> Result<(), ConfluenceError>;

    /// Remove a single label from a page by name.
    fn delete_label(&self, page_id: &str, label: &str) -> Result<(), ConfluenceError>;

    /// Upload new attachments in one call.
    fn add_attachments(
        &self,
        page_id: &str,
        attachments: &[PageAttachmentInput],
    ) -> Result<Vec<Attachment>, ConfluenceError>;

    /// Upload new content for an existing attachment.
    fn update_attachment(
        &self,
        page_id: &str,
        attachment_id: &str,
        attachment: &PageAttachmentInput,
    ) -> Result<Attachment, ConfluenceError>;

    /// Delete an attachment by ID.
    fn delete_attachment(&self, attachment_id: &str) -> Result<(), ConfluenceError>;

    /// List the direct child pages of a page.
    fn find_child_pages(
        &self,
        page_id: &str,
        expansions: &[&str],
    ) -> Result<Vec<ConfluencePage>, ConfluenceError>;

    /// Delete a single page.
    fn delete_page(&self, page_id: &str) -> Result<(), ConfluenceError>;
}
