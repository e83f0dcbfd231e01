//! In-memory Confluence for testing.
//!
//! Provides [`MockConfluence`], a stateful fake of [`ConfluenceApi`] that
//! records every call it receives.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use crate::api::ConfluenceApi;
use crate::error::ConfluenceError;
use crate::types::{
    Attachment, AttachmentsResponse, Body, ConfluencePage, Label, LabelsResponse,
    PageAttachmentInput, PageChildren, PageContentInput, PageMetadata, PageProperty,
    PagePropertyInput, PageUpdateOptions, PropertyVersion, Storage, Version,
};

/// Property expansion prefix.
const PROPERTY_EXPANSION: &str = "metadata.properties.";

/// A call received by [`MockConfluence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// [`ConfluenceApi::find_pages`].
    FindPages {
        space: String,
        title: String,
        expansions: Vec<String>,
    },
    /// [`ConfluenceApi::create_page`].
    CreatePage {
        input: PageContentInput,
        options: PageUpdateOptions,
        expansions: Vec<String>,
    },
    /// [`ConfluenceApi::update_page`].
    UpdatePage {
        page_id: String,
        input: PageContentInput,
        options: PageUpdateOptions,
    },
    /// [`ConfluenceApi::set_page_property`].
    SetPageProperty {
        page_id: String,
        name: String,
        input: PagePropertyInput,
    },
    /// [`ConfluenceApi::add_labels`].
    AddLabels { page_id: String, labels: Vec<String> },
    /// [`ConfluenceApi::delete_label`].
    DeleteLabel { page_id: String, label: String },
    /// [`ConfluenceApi::add_attachments`].
    AddAttachments {
        page_id: String,
        attachments: Vec<PageAttachmentInput>,
    },
    /// [`ConfluenceApi::update_attachment`].
    UpdateAttachment {
        page_id: String,
        attachment_id: String,
        attachment: PageAttachmentInput,
    },
    /// [`ConfluenceApi::delete_attachment`].
    DeleteAttachment { attachment_id: String },
    /// [`ConfluenceApi::find_child_pages`].
    FindChildPages {
        page_id: String,
        expansions: Vec<String>,
    },
    /// [`ConfluenceApi::delete_page`].
    DeletePage { page_id: String },
}

impl Call {
    /// Whether the call changes remote state.
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::FindPages { .. } | Self::FindChildPages { .. })
    }
}

/// Page stored in [`MockConfluence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPage {
    /// Page ID.
    pub id: String,
    /// Space key.
    pub space: String,
    /// Page title.
    pub title: String,
    /// Parent page ID.
    pub parent_id: Option<String>,
    /// Storage-format body.
    pub body: String,
    /// Current version.
    pub version: u32,
    /// Label names.
    pub labels: Vec<String>,
    /// Properties as `name -> (value, version)`.
    pub properties: BTreeMap<String, (String, u32)>,
    /// Attachments.
    pub attachments: Vec<MockAttachment>,
}

/// Attachment stored in [`MockConfluence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAttachment {
    /// Attachment ID.
    pub id: String,
    /// Attachment filename.
    pub name: String,
    /// Attachment comment.
    pub comment: Option<String>,
}

impl MockPage {
    /// Create a page at version 1 with an empty body.
    #[must_use]
    pub fn new(id: impl Into<String>, space: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            space: space.into(),
            title: title.into(),
            parent_id: None,
            body: String::new(),
            version: 1,
            labels: Vec::new(),
            properties: BTreeMap::new(),
            attachments: Vec::new(),
        }
    }

    /// Set the parent page.
    #[must_use]
    pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the current version.
    #[must_use]
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Add a label.
    #[must_use]
    pub fn label(mut self, name: impl Into<String>) -> Self {
        self.labels.push(name.into());
        self
    }

    /// Add a property.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>, version: u32) -> Self {
        self.properties.insert(name.into(), (value.into(), version));
        self
    }

    /// Add an attachment.
    #[must_use]
    pub fn attachment(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        comment: Option<&str>,
    ) -> Self {
        self.attachments.push(MockAttachment {
            id: id.into(),
            name: name.into(),
            comment: comment.map(str::to_owned),
        });
        self
    }

    /// Render as an API response honouring `expansions`.
    fn render(&self, expansions: &[String]) -> ConfluencePage {
        let has = |e: &str| expansions.iter().any(|x| x == e);

        let labels = has("metadata.labels").then(|| LabelsResponse {
            results: self
                .labels
                .iter()
                .map(|name| Label {
                    prefix: Some("global".to_owned()),
                    name: name.clone(),
                    id: Some(format!("label-{name}")),
                    label: Some(name.clone()),
                })
                .collect(),
        });

        let requested: Vec<&str> = expansions
            .iter()
            .filter_map(|e| e.strip_prefix(PROPERTY_EXPANSION))
            .collect();
        let properties: Option<BTreeMap<String, PageProperty>> = (!requested.is_empty()).then(|| {
            requested
                .iter()
                .filter_map(|name| {
                    let (value, version) = self.properties.get(*name)?;
                    Some((
                        (*name).to_owned(),
                        PageProperty {
                            id: format!("{}-{name}", self.id),
                            key: (*name).to_owned(),
                            value: serde_json::Value::String(value.clone()),
                            version: PropertyVersion { number: *version },
                        },
                    ))
                })
                .collect()
        });

        let metadata = (labels.is_some() || properties.is_some())
            .then_some(PageMetadata { labels, properties });

        let children = has("children.attachment").then(|| PageChildren {
            attachment: Some(AttachmentsResponse {
                results: self.attachments.iter().map(MockAttachment::render).collect(),
            }),
        });

        ConfluencePage {
            id: self.id.clone(),
            title: self.title.clone(),
            version: has("version").then(|| Version {
                number: self.version,
                message: None,
            }),
            body: has("body.storage").then(|| Body {
                storage: Some(Storage {
                    value: self.body.clone(),
                    representation: "storage".to_owned(),
                }),
            }),
            metadata,
            children,
            links: None,
        }
    }
}

impl MockAttachment {
    fn render(&self) -> Attachment {
        let mut metadata = BTreeMap::new();
        if let Some(comment) = &self.comment {
            metadata.insert(
                "comment".to_owned(),
                serde_json::Value::String(comment.clone()),
            );
        }
        Attachment {
            id: self.id.clone(),
            title: self.name.clone(),
            metadata,
        }
    }
}

/// Injected failure: returns an error for matching calls.
type FailureRule = Box<dyn Fn(&Call) -> Option<ConfluenceError> + Send + Sync>;

#[derive(Debug, Default)]
struct MockState {
    pages: HashMap<String, MockPage>,
    next_id: u64,
}

/// In-memory Confluence.
///
/// Enforces the same optimistic versioning as the real server: a page update
/// must carry the current version plus one, an existing property write its
/// current version plus one, and a new property write version 1.
///
/// # Example
///
/// ```ignore
/// use pagesync_confluence::{MockConfluence, MockPage};
///
/// let api = MockConfluence::new()
///     .with_page(MockPage::new("1", "DOCS", "Home").version(3));
/// // ... run code against `&api` ...
/// assert!(api.calls().iter().all(|c| !c.is_write()));
/// ```
pub struct MockConfluence {
    state: Mutex<MockState>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Vec<FailureRule>>,
}

impl Default for MockConfluence {
    fn default() -> Self {
        Self {
            state: Mutex::new(MockState {
                pages: HashMap::new(),
                next_id: 1000,
            }),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }
}

impl MockConfluence {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, page: MockPage) -> Self {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert(page.id.clone(), page);
        self
    }

    /// Fail every call for which `rule` returns an error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn fail_when(
        self,
        rule: impl Fn(&Call) -> Option<ConfluenceError> + Send + Sync + 'static,
    ) -> Self {
        self.failures.lock().unwrap().push(Box::new(rule));
        self
    }

    /// Calls received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that change remote state, in order.
    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    /// Forget recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Snapshot of a stored page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn page(&self, id: &str) -> Option<MockPage> {
        self.state.lock().unwrap().pages.get(id).cloned()
    }

    /// Snapshot of a stored page by space and title.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn page_by_title(&self, space: &str, title: &str) -> Option<MockPage> {
        self.state
            .lock()
            .unwrap()
            .pages
            .values()
            .find(|p| p.space == space && p.title == title)
            .cloned()
    }

    /// Number of stored pages.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn page_count(&self) -> usize {
        self.state.lock().unwrap().pages.len()
    }

    /// Record a call and apply injected failures.
    fn record(&self, call: Call) -> Result<(), ConfluenceError> {
        let failure = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find_map(|rule| rule(&call));
        self.calls.lock().unwrap().push(call);
        failure.map_or(Ok(()), Err)
    }

    fn next_id(state: &mut MockState, prefix: &str) -> String {
        state.next_id += 1;
        format!("{prefix}{}", state.next_id)
    }
}

fn owned(expansions: &[&str]) -> Vec<String> {
    expansions.iter().map(|e| (*e).to_owned()).collect()
}

fn not_found(id: &str) -> ConfluenceError {
    ConfluenceError::NotFound(format!("No content found with id: {id}"))
}

fn page_mut<'a>(state: &'a mut MockState, id: &str) -> Result<&'a mut MockPage, ConfluenceError> {
    state.pages.get_mut(id).ok_or_else(|| not_found(id))
}

impl ConfluenceApi for MockConfluence {
    fn find_pages(
        &self,
        space: &str,
        title: &str,
        expansions: &[&str],
    ) -> Result<Vec<ConfluencePage>, ConfluenceError> {
        let expansions = owned(expansions);
        self.record(Call::FindPages {
            space: space.to_owned(),
            title: title.to_owned(),
            expansions: expansions.clone(),
        })?;

        let state = self.state.lock().unwrap();
        let mut pages: Vec<_> = state
            .pages
            .values()
            .filter(|p| p.space == space && p.title == title)
            .collect();
        pages.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(pages.into_iter().map(|p| p.render(&expansions)).collect())
    }

    fn create_page(
        &self,
        value: &PageContentInput,
        options: &PageUpdateOptions,
        expansions: &[&str],
    ) -> Result<ConfluencePage, ConfluenceError> {
        let expansions = owned(expansions);
        self.record(Call::CreatePage {
            input: value.clone(),
            options: options.clone(),
            expansions: expansions.clone(),
        })?;

        let space = match value.space.as_deref() {
            Some(space) if !space.is_empty() => space.to_owned(),
            _ => {
                return Err(ConfluenceError::InvalidInput(
                    "space is required when creating pages".to_owned(),
                ));
            }
        };

        let mut state = self.state.lock().unwrap();
        if state
            .pages
            .values()
            .any(|p| p.space == space && p.title == value.title)
        {
            return Err(ConfluenceError::HttpResponse {
                status: 400,
                body: format!("A page with this title already exists: {}", value.title),
            });
        }

        let id = Self::next_id(&mut state, "");
        let page = MockPage {
            id: id.clone(),
            space,
            title: value.title.clone(),
            parent_id: value.parent_page.clone(),
            body: value.content.clone(),
            version: 1,
            labels: Vec::new(),
            properties: BTreeMap::new(),
            attachments: Vec::new(),
        };
        let rendered = page.render(&expansions);
        state.pages.insert(id, page);
        Ok(rendered)
    }

    fn update_page(
        &self,
        page_id: &str,
        value: &PageContentInput,
        options: &PageUpdateOptions,
    ) -> Result<ConfluencePage, ConfluenceError> {
        self.record(Call::UpdatePage {
            page_id: page_id.to_owned(),
            input: value.clone(),
            options: options.clone(),
        })?;

        let mut state = self.state.lock().unwrap();
        let page = page_mut(&mut state, page_id)?;
        if value.version != page.version + 1 {
            return Err(ConfluenceError::VersionConflict(format!(
                "Version must be incremented on update. Current version is: {}",
                page.version
            )));
        }
        page.version = value.version;
        page.title.clone_from(&value.title);
        page.body.clone_from(&value.content);
        if let Some(parent) = &value.parent_page {
            page.parent_id = Some(parent.clone());
        }
        Ok(page.render(&["version".to_owned()]))
    }

    fn set_page_property(
        &self,
        page_id: &str,
        name: &str,
        value: &PagePropertyInput,
    ) -> Result<(), ConfluenceError> {
        self.record(Call::SetPageProperty {
            page_id: page_id.to_owned(),
            name: name.to_owned(),
            input: value.clone(),
        })?;

        let mut state = self.state.lock().unwrap();
        let page = page_mut(&mut state, page_id)?;
        let expected = page.properties.get(name).map_or(1, |(_, v)| v + 1);
        if value.version.number != expected {
            return Err(ConfluenceError::VersionConflict(format!(
                "Property '{name}' expects version {expected}, got {}",
                value.version.number
            )));
        }
        page.properties
            .insert(name.to_owned(), (value.value.clone(), expected));
        Ok(())
    }

    fn add_labels(&self, page_id: &str, labels: &[String]) -> Result<(), ConfluenceError> {
        self.record(Call::AddLabels {
            page_id: page_id.to_owned(),
            labels: labels.to_vec(),
        })?;

        let mut state = self.state.lock().unwrap();
        let page = page_mut(&mut state, page_id)?;
        for label in labels {
            if !page.labels.contains(label) {
                page.labels.push(label.clone());
            }
        }
        Ok(())
    }

    fn delete_label(&self, page_id: &str, label: &str) -> Result<(), ConfluenceError> {
        self.record(Call::DeleteLabel {
            page_id: page_id.to_owned(),
            label: label.to_owned(),
        })?;

        let mut state = self.state.lock().unwrap();
        page_mut(&mut state, page_id)?.labels.retain(|l| l != label);
        Ok(())
    }

    fn add_attachments(
        &self,
        page_id: &str,
        attachments: &[PageAttachmentInput],
    ) -> Result<Vec<Attachment>, ConfluenceError> {
        self.record(Call::AddAttachments {
            page_id: page_id.to_owned(),
            attachments: attachments.to_vec(),
        })?;

        let mut state = self.state.lock().unwrap();
        page_mut(&mut state, page_id)?;
        let mut added = Vec::with_capacity(attachments.len());
        for input in attachments {
            let id = Self::next_id(&mut state, "att");
            let page = page_mut(&mut state, page_id)?;
            if page.attachments.iter().any(|a| a.name == input.name) {
                return Err(ConfluenceError::HttpResponse {
                    status: 400,
                    body: format!("Cannot add a new attachment with same file name: {}", input.name),
                });
            }
            let attachment = MockAttachment {
                id,
                name: input.name.clone(),
                comment: input.comment.clone(),
            };
            added.push(attachment.render());
            page.attachments.push(attachment);
        }
        Ok(added)
    }

    fn update_attachment(
        &self,
        page_id: &str,
        attachment_id: &str,
        attachment: &PageAttachmentInput,
    ) -> Result<Attachment, ConfluenceError> {
        self.record(Call::UpdateAttachment {
            page_id: page_id.to_owned(),
            attachment_id: attachment_id.to_owned(),
            attachment: attachment.clone(),
        })?;

        let mut state = self.state.lock().unwrap();
        let stored = page_mut(&mut state, page_id)?
            .attachments
            .iter_mut()
            .find(|a| a.id == attachment_id)
            .ok_or_else(|| not_found(attachment_id))?;
        stored.comment.clone_from(&attachment.comment);
        Ok(stored.render())
    }

    fn delete_attachment(&self, attachment_id: &str) -> Result<(), ConfluenceError> {
        self.record(Call::DeleteAttachment {
            attachment_id: attachment_id.to_owned(),
        })?;

        let mut state = self.state.lock().unwrap();
        for page in state.pages.values_mut() {
            if let Some(pos) = page.attachments.iter().position(|a| a.id == attachment_id) {
                page.attachments.remove(pos);
                return Ok(());
            }
        }
        Err(not_found(attachment_id))
    }

    fn find_child_pages(
        &self,
        page_id: &str,
        expansions: &[&str],
    ) -> Result<Vec<ConfluencePage>, ConfluenceError> {
        let expansions = owned(expansions);
        self.record(Call::FindChildPages {
            page_id: page_id.to_owned(),
            expansions: expansions.clone(),
        })?;

        let state = self.state.lock().unwrap();
        let mut children: Vec<_> = state
            .pages
            .values()
            .filter(|p| p.parent_id.as_deref() == Some(page_id))
            .collect();
        children.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(children.into_iter().map(|p| p.render(&expansions)).collect())
    }

    fn delete_page(&self, page_id: &str) -> Result<(), ConfluenceError> {
        self.record(Call::DeletePage {
            page_id: page_id.to_owned(),
        })?;

        let mut state = self.state.lock().unwrap();
        state
            .pages
            .remove(page_id)
            .map(|_| ())
            .ok_or_else(|| not_found(page_id))
    }
}
