//! Subtree deletion and orphan cleanup.

use std::collections::HashSet;

use pagesync_config::OrphanPolicy;
use pagesync_confluence::ConfluenceApi;
use pagesync_confluence::types::ConfluencePage;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::UploadError;
use crate::operations::PageUploadOperations;
use crate::{HASH_PROPERTY, HASH_PROPERTY_EXPANSION};

impl<A: ConfluenceApi> PageUploadOperations<'_, A> {
    /// List the direct children of a page with their `contenthash` property.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub fn find_child_pages(&self, page_id: &str) -> Result<Vec<ConfluencePage>, UploadError> {
        Ok(self
            .api
            .find_child_pages(page_id, &[HASH_PROPERTY_EXPANSION])?)
    }

    /// Delete a page and everything below it.
    ///
    /// Each page is deleted only after all of its descendants. Siblings are
    /// deleted concurrently; the first failure stops the parent from being
    /// deleted.
    ///
    /// # Errors
    ///
    /// Returns the first gateway error.
    pub fn delete_page_with_children(&self, page_id: &str) -> Result<(), UploadError> {
        let children = self.api.find_child_pages(page_id, &[])?;
        debug!("Page {} has {} child page(s)", page_id, children.len());

        children
            .par_iter()
            .try_for_each(|child| self.delete_page_with_children(&child.id))?;

        self.api.delete_page(page_id)?;
        info!("Deleted page {}", page_id);
        Ok(())
    }

    /// Child pages of `parents` that are not in `keep` and that the orphan
    /// policy allows deleting.
    ///
    /// # Errors
    ///
    /// Returns the first gateway error.
    pub fn find_orphans(
        &self,
        parents: &[&str],
        keep: &HashSet<&str>,
    ) -> Result<Vec<ConfluencePage>, UploadError> {
        let policy = self.config.orphans;
        if policy == OrphanPolicy::None {
            return Ok(Vec::new());
        }

        let mut orphans = Vec::new();
        for parent in parents {
            for child in self.find_child_pages(parent)? {
                if keep.contains(child.title.as_str()) {
                    continue;
                }
                if policy == OrphanPolicy::Managed && child.property(HASH_PROPERTY).is_none() {
                    debug!("Keeping unmanaged page '{}' ({})", child.title, child.id);
                    continue;
                }
                orphans.push(child);
            }
        }
        Ok(orphans)
    }
}
