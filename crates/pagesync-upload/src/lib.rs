//! Page synchronization engine for pagesync.
//!
//! Publishes locally rendered pages to Confluence with as few API calls as
//! possible:
//!
//! - [`PageUploadOperations::sync_page`] creates a page, updates it when its
//!   content changed, and reconciles its labels and attachments
//! - [`ChangeDetector`] decides whether content changed, by stored hash or by
//!   body comparison
//! - [`PageUploadOperations::upload_tree`] uploads a page hierarchy,
//!   siblings in parallel, and optionally removes orphaned pages
//! - [`PageUploadOperations::delete_page_with_children`] deletes a subtree
//!   bottom-up
//!
//! # Example
//!
//! ```ignore
//! use pagesync_upload::{PageNode, PageUploadOperations, UploadConfig};
//!
//! let ops = PageUploadOperations::new(&client, UploadConfig::default());
//! let report = ops.upload_tree(&nodes, "DOCS", "123456");
//! for failure in &report.failed {
//!     eprintln!("{}: {}", failure.title, failure.error);
//! }
//! ```

mod attachments;
mod content_type;
mod delete;
mod detector;
mod error;
mod labels;
mod operations;
mod page;
mod tree;

pub use attachments::{AttachmentChanges, has_hash, hash_comment};
pub use content_type::content_type;
pub use detector::{BASELINE_EXPANSIONS, ChangeDetector};
pub use error::UploadError;
pub use labels::LabelChanges;
pub use operations::PageUploadOperations;
pub use page::{ContentSync, DesiredAttachment, DesiredPage, PageAction, ServerPage, SyncResult};
pub use tree::{PageFailure, PageNode, UploadReport};

use pagesync_config::{EditorVersion, OrphanPolicy, UploadSettings};

/// Page property holding the content hash of the last upload.
pub const HASH_PROPERTY: &str = "contenthash";

/// Page property holding the editor format version.
pub const EDITOR_PROPERTY: &str = "editor";

/// Expansion that includes [`HASH_PROPERTY`].
pub const HASH_PROPERTY_EXPANSION: &str = "metadata.properties.contenthash";

/// Caller-supplied behavior of an upload.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Version message for creates and updates. Empty means none.
    pub change_message: String,
    /// Notify page watchers of updates.
    pub notify_watchers: bool,
    /// How changed content is detected.
    pub change_detector: ChangeDetector,
    /// Value written to the `editor` property of new pages.
    pub editor_version: EditorVersion,
    /// Which orphan pages a tree upload removes.
    pub orphans: OrphanPolicy,
}

impl UploadConfig {
    /// Build from the `[upload]` config section.
    pub fn from_settings(settings: &UploadSettings) -> Self {
        Self {
            change_message: settings.change_message.clone(),
            notify_watchers: settings.notify_watchers,
            change_detector: settings.change_detector.into(),
            editor_version: settings.editor_version,
            orphans: settings.remove_orphans,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::from_settings(&UploadSettings::default())
    }
}
