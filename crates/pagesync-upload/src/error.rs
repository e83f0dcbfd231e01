//! Error types for page synchronization.

use pagesync_confluence::ConfluenceError;

/// Error while synchronizing a page.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// More than one page in the space has the same title.
    #[error("{count} pages titled '{title}' found in space {space}")]
    AmbiguousPage {
        /// Space key.
        space: String,
        /// Page title.
        title: String,
        /// Number of matches.
        count: usize,
    },

    /// A page needs creating but no target space was given.
    #[error("cannot create page '{title}': no space set")]
    MissingSpace {
        /// Page title.
        title: String,
    },

    /// The page was found on lookup but was gone when updated.
    #[error("page {id} disappeared before it could be updated")]
    PageVanished {
        /// Page ID.
        id: String,
    },

    /// Lookup returned a page without its version.
    #[error("page {id} was returned without a version number")]
    MissingVersion {
        /// Page ID.
        id: String,
    },

    /// Confluence API error.
    #[error(transparent)]
    Confluence(#[from] ConfluenceError),
}
