//! Page tree upload.
//!
//! Siblings are synchronized concurrently on the rayon pool. A page's
//! children start only once the page itself is synchronized, since they need
//! its ID as their parent.

use std::collections::HashSet;

use pagesync_config::OrphanPolicy;
use pagesync_confluence::ConfluenceApi;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::UploadError;
use crate::operations::PageUploadOperations;
use crate::page::{DesiredAttachment, DesiredPage, SyncResult};

/// A page to upload and the pages to file under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageNode {
    /// Page title.
    pub title: String,
    /// Storage-format body.
    pub body: String,
    /// Digest of `body`.
    pub content_hash: String,
    /// Label names.
    pub labels: Vec<String>,
    /// Attachments.
    pub attachments: Vec<DesiredAttachment>,
    /// Child pages.
    pub children: Vec<PageNode>,
}

impl PageNode {
    /// Target state of this page when filed under `parent_id` in `space`.
    pub fn desired(&self, space: &str, parent_id: &str) -> DesiredPage {
        DesiredPage {
            title: self.title.clone(),
            parent_id: parent_id.to_owned(),
            space: space.to_owned(),
            body: self.body.clone(),
            content_hash: self.content_hash.clone(),
            labels: self.labels.clone(),
            attachments: self.attachments.clone(),
        }
    }

    /// Push the titles of all descendants, depth first.
    fn descendant_titles<'a>(&'a self, out: &mut Vec<&'a str>) {
        for child in &self.children {
            out.push(&child.title);
            child.descendant_titles(out);
        }
    }
}

/// A page that could not be synchronized.
#[derive(Debug)]
pub struct PageFailure {
    /// Page title.
    pub title: String,
    /// What went wrong.
    pub error: UploadError,
}

/// Outcome of a tree upload.
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Pages synchronized, parents before their children.
    pub synced: Vec<SyncResult>,
    /// Pages that failed.
    pub failed: Vec<PageFailure>,
    /// Titles not attempted because an ancestor failed.
    pub skipped: Vec<String>,
    /// Titles of orphan pages deleted with their subtrees.
    pub removed: Vec<String>,
}

impl UploadReport {
    /// Whether every page was synchronized.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }

    fn merge(&mut self, other: Self) {
        self.synced.extend(other.synced);
        self.failed.extend(other.failed);
        self.skipped.extend(other.skipped);
        self.removed.extend(other.removed);
    }
}

impl<A: ConfluenceApi> PageUploadOperations<'_, A> {
    /// Upload a page tree under `root_parent_id`.
    ///
    /// Failures are collected in the report rather than returned: a failed
    /// page skips its own subtree but not its siblings. Orphan cleanup runs
    /// afterwards, and only if nothing failed.
    pub fn upload_tree(
        &self,
        nodes: &[PageNode],
        space: &str,
        root_parent_id: &str,
    ) -> UploadReport {
        let mut report = self.upload_level(nodes, space, root_parent_id);

        if self.config.orphans != OrphanPolicy::None {
            if report.is_success() {
                self.remove_orphans(nodes, root_parent_id, &mut report);
            } else {
                warn!(
                    "Skipping orphan cleanup: {} page(s) failed",
                    report.failed.len()
                );
            }
        }

        info!(
            "Synchronized {} page(s), {} failed, {} skipped, {} removed",
            report.synced.len(),
            report.failed.len(),
            report.skipped.len(),
            report.removed.len()
        );
        report
    }

    fn upload_level(&self, nodes: &[PageNode], space: &str, parent_id: &str) -> UploadReport {
        let reports: Vec<UploadReport> = nodes
            .par_iter()
            .map(|node| self.upload_node(node, space, parent_id))
            .collect();

        let mut report = UploadReport::default();
        for r in reports {
            report.merge(r);
        }
        report
    }

    fn upload_node(&self, node: &PageNode, space: &str, parent_id: &str) -> UploadReport {
        match self.sync_page(&node.desired(space, parent_id)) {
            Ok(result) => {
                let id = result.page.id.clone();
                let mut report = UploadReport {
                    synced: vec![result],
                    ..UploadReport::default()
                };
                report.merge(self.upload_level(&node.children, space, &id));
                report
            }
            Err(error) => {
                warn!("Failed to synchronize page '{}': {}", node.title, error);
                let mut skipped = Vec::new();
                node.descendant_titles(&mut skipped);
                UploadReport {
                    skipped: skipped.into_iter().map(str::to_owned).collect(),
                    failed: vec![PageFailure {
                        title: node.title.clone(),
                        error,
                    }],
                    ..UploadReport::default()
                }
            }
        }
    }

    /// Delete child pages of the root and of every synced page that are not
    /// part of the uploaded tree.
    fn remove_orphans(&self, nodes: &[PageNode], root_parent_id: &str, report: &mut UploadReport) {
        let mut keep = Vec::new();
        for node in nodes {
            keep.push(node.title.as_str());
            node.descendant_titles(&mut keep);
        }
        let keep: HashSet<&str> = keep.into_iter().collect();

        let parent_ids: Vec<String> = std::iter::once(root_parent_id.to_owned())
            .chain(report.synced.iter().map(|r| r.page.id.clone()))
            .collect();
        let parents: Vec<&str> = parent_ids.iter().map(String::as_str).collect();

        let orphans = match self.find_orphans(&parents, &keep) {
            Ok(orphans) => orphans,
            Err(error) => {
                warn!("Failed to list orphan pages: {}", error);
                report.failed.push(PageFailure {
                    title: format!("orphans under {root_parent_id}"),
                    error,
                });
                return;
            }
        };

        for orphan in orphans {
            match self.delete_page_with_children(&orphan.id) {
                Ok(()) => {
                    info!("Removed orphan page '{}' ({})", orphan.title, orphan.id);
                    report.removed.push(orphan.title);
                }
                Err(error) => {
                    warn!("Failed to remove orphan page '{}': {}", orphan.title, error);
                    report.failed.push(PageFailure {
                        title: orphan.title,
                        error,
                    });
                }
            }
        }
    }
}
