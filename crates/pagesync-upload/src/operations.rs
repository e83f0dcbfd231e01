//! Page create-or-update workflow.

use pagesync_confluence::types::{
    ConfluencePage, PageContentInput, PagePropertyInput, PageUpdateOptions,
};
use pagesync_confluence::{ConfluenceApi, ConfluenceError};
use tracing::{debug, info};

use crate::detector::BASELINE_EXPANSIONS;
use crate::error::UploadError;
use crate::page::{ContentSync, DesiredPage, PageAction, ServerPage, SyncResult};
use crate::{EDITOR_PROPERTY, HASH_PROPERTY, UploadConfig};

/// Synchronizes local pages with Confluence.
///
/// Every operation is a straight sequence of blocking gateway calls; nothing
/// is retried, and the first error aborts the operation.
pub struct PageUploadOperations<'a, A: ConfluenceApi> {
    pub(crate) api: &'a A,
    pub(crate) config: UploadConfig,
}

impl<'a, A: ConfluenceApi> PageUploadOperations<'a, A> {
    /// Create operations over `api`.
    pub fn new(api: &'a A, config: UploadConfig) -> Self {
        Self { api, config }
    }

    /// Create the page, or update it if its content changed.
    ///
    /// Writes the `contenthash` property after every create or update, and
    /// the `editor` property on create only. Unchanged pages get no writes.
    ///
    /// # Errors
    ///
    /// - [`UploadError::AmbiguousPage`] if the title matches several pages
    /// - [`UploadError::MissingSpace`] if a page must be created without a space
    /// - [`UploadError::MissingVersion`] if a changed page came back without a version
    /// - [`UploadError::PageVanished`] if the page was deleted during the update
    /// - [`UploadError::Confluence`] for any other gateway error
    pub fn create_or_update_page_content(
        &self,
        desired: &DesiredPage,
    ) -> Result<ContentSync, UploadError> {
        let expansions = self.config.change_detector.lookup_expansions();
        let found = self
            .api
            .find_pages(&desired.space, &desired.title, &expansions)?;

        match found.as_slice() {
            [] => Ok(ContentSync {
                page: self.create_page(desired)?,
                action: PageAction::Created,
            }),
            [existing] => self.update_page(existing, desired),
            _ => Err(UploadError::AmbiguousPage {
                space: desired.space.clone(),
                title: desired.title.clone(),
                count: found.len(),
            }),
        }
    }

    fn create_page(&self, desired: &DesiredPage) -> Result<ServerPage, UploadError> {
        if desired.space.is_empty() {
            return Err(UploadError::MissingSpace {
                title: desired.title.clone(),
            });
        }

        let input = PageContentInput::create(
            &desired.parent_id,
            &desired.title,
            &desired.body,
            &desired.space,
        );
        let created = self
            .api
            .create_page(&input, &self.update_options(), &BASELINE_EXPANSIONS)?;

        self.api.set_page_property(
            &created.id,
            HASH_PROPERTY,
            &PagePropertyInput::new_property(&desired.content_hash),
        )?;
        self.api.set_page_property(
            &created.id,
            EDITOR_PROPERTY,
            &PagePropertyInput::new_property(self.config.editor_version.property_value()),
        )?;

        info!("Created page '{}' ({})", desired.title, created.id);
        Ok(ServerPage::from_remote(&created, &desired.parent_id))
    }

    fn update_page(
        &self,
        existing: &ConfluencePage,
        desired: &DesiredPage,
    ) -> Result<ContentSync, UploadError> {
        let page = ServerPage::from_remote(existing, &desired.parent_id);

        if !self.config.change_detector.is_changed(existing, desired) {
            debug!("Page '{}' ({}) is unchanged", desired.title, existing.id);
            return Ok(ContentSync {
                page,
                action: PageAction::Unchanged,
            });
        }

        let version = existing
            .version_number()
            .ok_or_else(|| UploadError::MissingVersion {
                id: existing.id.clone(),
            })?;
        let input = PageContentInput::update(
            &desired.parent_id,
            &desired.title,
            &desired.body,
            version + 1,
        );
        match self
            .api
            .update_page(&existing.id, &input, &self.update_options())
        {
            Ok(_) => {}
            Err(ConfluenceError::NotFound(_)) => {
                return Err(UploadError::PageVanished {
                    id: existing.id.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        let hash = match existing.property(HASH_PROPERTY) {
            Some(property) => {
                PagePropertyInput::new(&desired.content_hash, property.version.next())
            }
            None => PagePropertyInput::new_property(&desired.content_hash),
        };
        self.api
            .set_page_property(&existing.id, HASH_PROPERTY, &hash)?;

        info!(
            "Updated page '{}' ({}) to version {}",
            desired.title,
            existing.id,
            version + 1
        );
        Ok(ContentSync {
            page,
            action: PageAction::Updated,
        })
    }

    /// Synchronize content, then labels, then attachments of one page.
    ///
    /// # Errors
    ///
    /// Returns the first error; earlier steps stay applied.
    pub fn sync_page(&self, desired: &DesiredPage) -> Result<SyncResult, UploadError> {
        let ContentSync { page, action } = self.create_or_update_page_content(desired)?;
        self.update_page_labels(&page, desired)?;
        self.update_page_attachments(&page, desired)?;

        Ok(SyncResult {
            page,
            action,
            labels: unique(desired.labels.iter()),
            attachments: unique(desired.attachments.iter().map(|a| &a.name)),
        })
    }

    /// Version options for create and update calls.
    fn update_options(&self) -> PageUpdateOptions {
        let message = &self.config.change_message;
        PageUpdateOptions {
            notify_watchers: self.config.notify_watchers,
            message: (!message.is_empty()).then(|| message.clone()),
        }
    }
}

/// Names in first-seen order without repeats.
fn unique<'n>(names: impl Iterator<Item = &'n String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pagesync_confluence::types::{Attachment, PageAttachmentInput, PropertyVersion};
    use pagesync_confluence::{Call, MockConfluence, MockPage};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ChangeDetector;
    use crate::page::DesiredAttachment;

    fn desired() -> DesiredPage {
        DesiredPage {
            title: "Page title".to_owned(),
            parent_id: "parentId".to_owned(),
            space: "TEST".to_owned(),
            body: "body".to_owned(),
            content_hash: "body-hash".to_owned(),
            labels: Vec::new(),
            attachments: Vec::new(),
        }
    }

    fn config(detector: ChangeDetector) -> UploadConfig {
        UploadConfig {
            change_detector: detector,
            ..UploadConfig::default()
        }
    }

    fn options() -> PageUpdateOptions {
        PageUpdateOptions {
            notify_watchers: false,
            message: Some("Automated upload by pagesync".to_owned()),
        }
    }

    fn expansions(detector: ChangeDetector) -> Vec<String> {
        detector
            .lookup_expansions()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    fn baseline() -> Vec<String> {
        BASELINE_EXPANSIONS.iter().map(|e| (*e).to_owned()).collect()
    }

    /// Remote copy of [`desired`] as last written by pagesync.
    fn current_page() -> MockPage {
        MockPage::new("123", "TEST", "Page title")
            .parent("parentId")
            .body("body")
            .version(42)
            .property(HASH_PROPERTY, "body-hash", 3)
            .property(EDITOR_PROPERTY, "v2", 1)
    }

    fn stale_page() -> MockPage {
        MockPage::new("123", "TEST", "Page title")
            .parent("parentId")
            .body("old body")
            .version(42)
            .property(HASH_PROPERTY, "abc", 3)
            .property(EDITOR_PROPERTY, "v2", 1)
    }

    fn attachment(name: &str, hash: &str) -> DesiredAttachment {
        DesiredAttachment {
            name: name.to_owned(),
            content_hash: hash.to_owned(),
            resource_location: PathBuf::from(format!("/docs/{name}")),
        }
    }

    #[test]
    fn test_create_page() {
        let api = MockConfluence::new();
        let ops = PageUploadOperations::new(&api, UploadConfig::default());

        let result = ops.create_or_update_page_content(&desired()).unwrap();

        assert_eq!(result.action, PageAction::Created);
        let id = result.page.id.clone();
        assert_eq!(
            api.calls(),
            vec![
                Call::FindPages {
                    space: "TEST".to_owned(),
                    title: "Page title".to_owned(),
                    expansions: baseline(),
                },
                Call::CreatePage {
                    input: PageContentInput::create("parentId", "Page title", "body", "TEST"),
                    options: options(),
                    expansions: baseline(),
                },
                Call::SetPageProperty {
                    page_id: id.clone(),
                    name: "contenthash".to_owned(),
                    input: PagePropertyInput::new_property("body-hash"),
                },
                Call::SetPageProperty {
                    page_id: id,
                    name: "editor".to_owned(),
                    input: PagePropertyInput::new_property("v2"),
                },
            ]
        );
    }

    #[test]
    fn test_create_writes_configured_editor() {
        let api = MockConfluence::new();
        let config = UploadConfig {
            editor_version: pagesync_config::EditorVersion::V1,
            ..UploadConfig::default()
        };
        let ops = PageUploadOperations::new(&api, config);

        let result = ops.create_or_update_page_content(&desired()).unwrap();

        let page = api.page(&result.page.id).unwrap();
        assert_eq!(page.properties["editor"], ("v1".to_owned(), 1));
    }

    #[test]
    fn test_update_changed_page() {
        let api = MockConfluence::new().with_page(stale_page());
        let ops = PageUploadOperations::new(&api, config(ChangeDetector::Hash));

        let result = ops.create_or_update_page_content(&desired()).unwrap();

        assert_eq!(result.action, PageAction::Updated);
        assert_eq!(result.page.id, "123");
        assert_eq!(
            api.writes(),
            vec![
                Call::UpdatePage {
                    page_id: "123".to_owned(),
                    input: PageContentInput::update("parentId", "Page title", "body", 43),
                    options: options(),
                },
                Call::SetPageProperty {
                    page_id: "123".to_owned(),
                    name: "contenthash".to_owned(),
                    input: PagePropertyInput::new("body-hash", PropertyVersion { number: 4 }),
                },
            ]
        );
        let page = api.page("123").unwrap();
        assert_eq!(page.version, 43);
        assert_eq!(page.properties["editor"], ("v2".to_owned(), 1));
    }

    #[test]
    fn test_update_changed_page_with_content_detector() {
        let api = MockConfluence::new().with_page(stale_page());
        let ops = PageUploadOperations::new(&api, config(ChangeDetector::Content));

        let result = ops.create_or_update_page_content(&desired()).unwrap();

        assert_eq!(result.action, PageAction::Updated);
        assert_eq!(
            api.calls()[0],
            Call::FindPages {
                space: "TEST".to_owned(),
                title: "Page title".to_owned(),
                expansions: expansions(ChangeDetector::Content),
            }
        );
        assert_eq!(api.page("123").unwrap().properties["contenthash"].1, 4);
    }

    #[test]
    fn test_update_without_hash_property() {
        let api = MockConfluence::new().with_page(
            MockPage::new("123", "TEST", "Page title")
                .parent("parentId")
                .version(7),
        );
        let ops = PageUploadOperations::new(&api, UploadConfig::default());

        ops.create_or_update_page_content(&desired()).unwrap();

        assert_eq!(
            api.writes()[1],
            Call::SetPageProperty {
                page_id: "123".to_owned(),
                name: "contenthash".to_owned(),
                input: PagePropertyInput::new_property("body-hash"),
            }
        );
    }

    #[test]
    fn test_unchanged_page_is_skipped() {
        for detector in ChangeDetector::ALL {
            let api = MockConfluence::new().with_page(current_page());
            let ops = PageUploadOperations::new(&api, config(detector));

            let result = ops.sync_page(&desired()).unwrap();

            assert_eq!(result.action, PageAction::Unchanged, "{detector:?}");
            assert_eq!(result.page.id, "123", "{detector:?}");
            assert_eq!(result.page.title, "Page title", "{detector:?}");
            assert!(api.writes().is_empty(), "{detector:?}");
            assert_eq!(api.page("123").unwrap().version, 42, "{detector:?}");
        }
    }

    #[test]
    fn test_second_sync_is_a_no_op() {
        for detector in ChangeDetector::ALL {
            let api = MockConfluence::new();
            let ops = PageUploadOperations::new(&api, config(detector));
            let page = DesiredPage {
                labels: vec!["docs".to_owned(), "api".to_owned()],
                attachments: vec![attachment("a.png", "h1"), attachment("b.txt", "h2")],
                ..desired()
            };

            let first = ops.sync_page(&page).unwrap();
            assert_eq!(first.action, PageAction::Created, "{detector:?}");
            api.clear_calls();

            let second = ops.sync_page(&page).unwrap();
            assert_eq!(second.action, PageAction::Unchanged, "{detector:?}");
            assert_eq!(second.page.id, first.page.id, "{detector:?}");
            assert!(api.writes().is_empty(), "{detector:?}");
        }
    }

    #[test]
    fn test_sync_after_update_is_a_no_op() {
        for detector in ChangeDetector::ALL {
            let api = MockConfluence::new().with_page(stale_page());
            let ops = PageUploadOperations::new(&api, config(detector));

            assert_eq!(
                ops.sync_page(&desired()).unwrap().action,
                PageAction::Updated
            );
            api.clear_calls();

            assert_eq!(
                ops.sync_page(&desired()).unwrap().action,
                PageAction::Unchanged
            );
            assert!(api.writes().is_empty(), "{detector:?}");
        }
    }

    #[test]
    fn test_ambiguous_title() {
        let api = MockConfluence::new()
            .with_page(MockPage::new("1", "TEST", "Page title"))
            .with_page(MockPage::new("2", "TEST", "Page title"));
        let ops = PageUploadOperations::new(&api, UploadConfig::default());

        let err = ops.sync_page(&desired()).unwrap_err();

        assert!(matches!(
            err,
            UploadError::AmbiguousPage { ref space, ref title, count: 2 }
                if space == "TEST" && title == "Page title"
        ));
        assert!(api.writes().is_empty());
    }

    #[test]
    fn test_create_without_space() {
        let api = MockConfluence::new();
        let ops = PageUploadOperations::new(&api, UploadConfig::default());
        let page = DesiredPage {
            space: String::new(),
            ..desired()
        };

        let err = ops.sync_page(&page).unwrap_err();

        assert!(matches!(err, UploadError::MissingSpace { ref title } if title == "Page title"));
        assert!(api.writes().is_empty());
    }

    #[test]
    fn test_vanished_page() {
        let api = MockConfluence::new()
            .with_page(stale_page())
            .fail_when(|call| {
                matches!(call, Call::UpdatePage { .. })
                    .then(|| ConfluenceError::NotFound("No content found".to_owned()))
            });
        let ops = PageUploadOperations::new(&api, UploadConfig::default());

        let err = ops.sync_page(&desired()).unwrap_err();

        assert!(matches!(err, UploadError::PageVanished { ref id } if id == "123"));
        assert_eq!(api.writes().len(), 1);
    }

    #[test]
    fn test_version_conflict_propagates() {
        let api = MockConfluence::new()
            .with_page(stale_page())
            .fail_when(|call| {
                matches!(call, Call::UpdatePage { .. })
                    .then(|| ConfluenceError::VersionConflict("stale".to_owned()))
            });
        let ops = PageUploadOperations::new(&api, UploadConfig::default());

        let err = ops.sync_page(&desired()).unwrap_err();

        assert!(matches!(
            err,
            UploadError::Confluence(ConfluenceError::VersionConflict(_))
        ));
        assert_eq!(api.writes().len(), 1);
    }

    #[test]
    fn test_property_failure_leaves_created_page() {
        let api = MockConfluence::new().fail_when(|call| {
            matches!(call, Call::SetPageProperty { .. }).then(|| ConfluenceError::HttpResponse {
                status: 500,
                body: "boom".to_owned(),
            })
        });
        let ops = PageUploadOperations::new(&api, UploadConfig::default());

        let err = ops.sync_page(&desired()).unwrap_err();

        assert!(matches!(
            err,
            UploadError::Confluence(ConfluenceError::HttpResponse { status: 500, .. })
        ));
        assert!(api.page_by_title("TEST", "Page title").is_some());
        assert_eq!(api.writes().len(), 2);
    }

    #[test]
    fn test_message_omitted_when_empty() {
        let api = MockConfluence::new().with_page(stale_page());
        let config = UploadConfig {
            change_message: String::new(),
            notify_watchers: true,
            ..UploadConfig::default()
        };
        let ops = PageUploadOperations::new(&api, config);

        ops.sync_page(&desired()).unwrap();

        let writes = api.writes();
        let Call::UpdatePage { options, .. } = &writes[0] else {
            panic!("expected an update");
        };
        assert_eq!(
            options,
            &PageUpdateOptions {
                notify_watchers: true,
                message: None,
            }
        );
    }

    #[test]
    fn test_labels_added_in_one_call_and_deleted_one_by_one() {
        let api = MockConfluence::new().with_page(
            current_page()
                .label("keep")
                .label("old1")
                .label("old2"),
        );
        let ops = PageUploadOperations::new(&api, UploadConfig::default());
        let page = DesiredPage {
            labels: vec!["new1".to_owned(), "keep".to_owned(), "new2".to_owned()],
            ..desired()
        };

        let result = ops.sync_page(&page).unwrap();

        assert_eq!(
            api.writes(),
            vec![
                Call::AddLabels {
                    page_id: "123".to_owned(),
                    labels: vec!["new1".to_owned(), "new2".to_owned()],
                },
                Call::DeleteLabel {
                    page_id: "123".to_owned(),
                    label: "old1".to_owned(),
                },
                Call::DeleteLabel {
                    page_id: "123".to_owned(),
                    label: "old2".to_owned(),
                },
            ]
        );
        assert_eq!(result.labels, vec!["new1", "keep", "new2"]);
        assert_eq!(api.page("123").unwrap().labels, vec!["keep", "new1", "new2"]);
    }

    #[test]
    fn test_only_deleted_labels() {
        let api = MockConfluence::new().with_page(current_page().label("gone"));
        let ops = PageUploadOperations::new(&api, UploadConfig::default());

        ops.sync_page(&desired()).unwrap();

        assert_eq!(
            api.writes(),
            vec![Call::DeleteLabel {
                page_id: "123".to_owned(),
                label: "gone".to_owned(),
            }]
        );
    }

    #[test]
    fn test_matching_labels_need_no_calls() {
        let api = MockConfluence::new().with_page(current_page().label("a").label("b"));
        let ops = PageUploadOperations::new(&api, UploadConfig::default());
        let page = DesiredPage {
            labels: vec!["b".to_owned(), "a".to_owned()],
            ..desired()
        };

        ops.sync_page(&page).unwrap();

        assert!(api.writes().is_empty());
    }

    #[test]
    fn test_attachments_reconciled() {
        let api = MockConfluence::new().with_page(
            current_page()
                .attachment("att1", "same.png", Some("HASH:h1"))
                .attachment("att2", "changed.txt", Some("HASH:old"))
                .attachment("att3", "orphan.jpg", Some("HASH:h3")),
        );
        let ops = PageUploadOperations::new(&api, UploadConfig::default());
        let page = DesiredPage {
            attachments: vec![
                attachment("same.png", "h1"),
                attachment("changed.txt", "new"),
                attachment("added.png", "h4"),
            ],
            ..desired()
        };

        let result = ops.sync_page(&page).unwrap();

        assert_eq!(
            api.writes(),
            vec![
                Call::DeleteAttachment {
                    attachment_id: "att3".to_owned(),
                },
                Call::UpdateAttachment {
                    page_id: "123".to_owned(),
                    attachment_id: "att2".to_owned(),
                    attachment: PageAttachmentInput {
                        name: "changed.txt".to_owned(),
                        content: PathBuf::from("/docs/changed.txt"),
                        comment: Some("HASH:new".to_owned()),
                        content_type: Some("text/plain".to_owned()),
                    },
                },
                Call::AddAttachments {
                    page_id: "123".to_owned(),
                    attachments: vec![PageAttachmentInput {
                        name: "added.png".to_owned(),
                        content: PathBuf::from("/docs/added.png"),
                        comment: Some("HASH:h4".to_owned()),
                        content_type: Some("image/png".to_owned()),
                    }],
                },
            ]
        );
        assert_eq!(
            result.attachments,
            vec!["same.png", "changed.txt", "added.png"]
        );
    }

    #[test]
    fn test_new_attachments_added_in_one_call() {
        let api = MockConfluence::new().with_page(current_page());
        let ops = PageUploadOperations::new(&api, UploadConfig::default());
        let page = DesiredPage {
            attachments: vec![attachment("a.png", "h1"), attachment("b.bin", "h2")],
            ..desired()
        };

        ops.sync_page(&page).unwrap();

        let writes = api.writes();
        assert_eq!(writes.len(), 1);
        let Call::AddAttachments { attachments, .. } = &writes[0] else {
            panic!("expected a batched add");
        };
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[1].content_type, None);
    }

    #[test]
    fn test_duplicate_attachment_names_uploaded_once() {
        let api = MockConfluence::new();
        let ops = PageUploadOperations::new(&api, UploadConfig::default());
        let page = DesiredPage {
            attachments: vec![attachment("a.png", "h1"), attachment("a.png", "h1")],
            ..desired()
        };

        let result = ops.sync_page(&page).unwrap();

        assert_eq!(result.attachments, vec!["a.png"]);
        let writes = api.writes();
        let Some(Call::AddAttachments { attachments, .. }) = writes.last() else {
            panic!("expected a batched add");
        };
        assert_eq!(attachments.len(), 1);
        assert_eq!(api.page(&result.page.id).unwrap().attachments.len(), 1);
    }

    /// Gateway whose lookups come back without the `version` expansion.
    struct Unversioned(MockConfluence);

    impl ConfluenceApi for Unversioned {
        fn find_pages(
            &self,
            space: &str,
            title: &str,
            expansions: &[&str],
        ) -> Result<Vec<ConfluencePage>, ConfluenceError> {
            let mut pages = self.0.find_pages(space, title, expansions)?;
            for page in &mut pages {
                page.version = None;
            }
            Ok(pages)
        }

        fn create_page(
            &self,
            value: &PageContentInput,
            options: &PageUpdateOptions,
            expansions: &[&str],
        ) -> Result<ConfluencePage, ConfluenceError> {
            self.0.create_page(value, options, expansions)
        }

        fn update_page(
            &self,
            page_id: &str,
            value: &PageContentInput,
            options: &PageUpdateOptions,
        ) -> Result<ConfluencePage, ConfluenceError> {
            self.0.update_page(page_id, value, options)
        }

        fn set_page_property(
            &self,
            page_id: &str,
            name: &str,
            value: &PagePropertyInput,
        ) -> Result<(), ConfluenceError> {
            self.0.set_page_property(page_id, name, value)
        }

        fn add_labels(&self, page_id: &str, labels: &[String]) -> Result<(), ConfluenceError> {
            self.0.add_labels(page_id, labels)
        }

        fn delete_label(&self, page_id: &str, label: &str) -> Result<(), ConfluenceError> {
            self.0.delete_label(page_id, label)
        }

        fn add_attachments(
            &self,
            page_id: &str,
            attachments: &[PageAttachmentInput],
        ) -> Result<Vec<Attachment>, ConfluenceError> {
            self.0.add_attachments(page_id, attachments)
        }

        fn update_attachment(
            &self,
            page_id: &str,
            attachment_id: &str,
            attachment: &PageAttachmentInput,
        ) -> Result<Attachment, ConfluenceError> {
            self.0.update_attachment(page_id, attachment_id, attachment)
        }

        fn delete_attachment(&self, attachment_id: &str) -> Result<(), ConfluenceError> {
            self.0.delete_attachment(attachment_id)
        }

        fn find_child_pages(
            &self,
            page_id: &str,
            expansions: &[&str],
        ) -> Result<Vec<ConfluencePage>, ConfluenceError> {
            self.0.find_child_pages(page_id, expansions)
        }

        fn delete_page(&self, page_id: &str) -> Result<(), ConfluenceError> {
            self.0.delete_page(page_id)
        }
    }

    #[test]
    fn test_changed_page_without_version_is_not_updated() {
        let api = Unversioned(MockConfluence::new().with_page(stale_page()));
        let ops = PageUploadOperations::new(&api, UploadConfig::default());

        let err = ops.sync_page(&desired()).unwrap_err();

        assert!(matches!(err, UploadError::MissingVersion { ref id } if id == "123"));
        assert!(api.0.writes().is_empty());
        assert_eq!(api.0.page("123").unwrap().version, 42);
    }

    #[test]
    fn test_unchanged_page_without_version_is_skipped() {
        let api = Unversioned(MockConfluence::new().with_page(current_page()));
        let ops = PageUploadOperations::new(&api, UploadConfig::default());

        let result = ops.sync_page(&desired()).unwrap();

        assert_eq!(result.action, PageAction::Unchanged);
        assert!(api.0.writes().is_empty());
    }

    #[test]
    fn test_no_attachments_need_no_calls() {
        let api = MockConfluence::new().with_page(current_page());
        let ops = PageUploadOperations::new(&api, UploadConfig::default());

        ops.update_page_attachments(
            &ServerPage::from_remote(
                &api.find_pages("TEST", "Page title", &[]).unwrap()[0],
                "parentId",
            ),
            &desired(),
        )
        .unwrap();

        assert!(api.writes().is_empty());
    }
}
