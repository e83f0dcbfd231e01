//! Confluence page types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Attachment, AttachmentsResponse, Label, LabelsResponse, PageProperty};

/// Confluence page.
///
/// Everything except `id` depends on the expansions requested, so all nested
/// structures are optional. Use the accessor methods to read them; they treat
/// an absent structure as empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConfluencePage {
    /// Page ID.
    pub id: String,
    /// Page title.
    #[serde(default)]
    pub title: String,
    /// Version information (`version` expansion).
    #[serde(default)]
    pub version: Option<Version>,
    /// Page body content (`body.storage` expansion).
    #[serde(default)]
    pub body: Option<Body>,
    /// Labels and properties (`metadata.*` expansions).
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
    /// Child content (`children.attachment` expansion).
    #[serde(default)]
    pub children: Option<PageChildren>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

impl ConfluencePage {
    /// Current version number, if the version was expanded.
    pub fn version_number(&self) -> Option<u32> {
        self.version.as_ref().map(|v| v.number)
    }

    /// Storage-format body, if the body was expanded.
    pub fn storage_body(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map(|s| s.value.as_str())
    }

    /// Page labels.
    pub fn labels(&self) -> &[Label] {
        self.metadata
            .as_ref()
            .and_then(|m| m.labels.as_ref())
            .map_or(&[], |l| l.results.as_slice())
    }

    /// Page property by key.
    pub fn property(&self, name: &str) -> Option<&PageProperty> {
        self.metadata
            .as_ref()
            .and_then(|m| m.properties.as_ref())
            .and_then(|p| p.get(name))
    }

    /// Page attachments.
    pub fn attachments(&self) -> &[Attachment] {
        self.children
            .as_ref()
            .and_then(|c| c.attachment.as_ref())
            .map_or(&[], |a| a.results.as_slice())
    }
}

/// Page version.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Version message/comment.
    #[serde(default)]
    pub message: Option<String>,
}

/// Page body content.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Storage {
    /// Markup in Confluence storage format.
    pub value: String,
    /// Content representation (always "storage").
    pub representation: String,
}

/// Page metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PageMetadata {
    /// Labels attached to the page.
    #[serde(default)]
    pub labels: Option<LabelsResponse>,
    /// Expanded page properties keyed by property name.
    #[serde(default)]
    pub properties: Option<BTreeMap<String, PageProperty>>,
}

/// Child content of a page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PageChildren {
    /// Attachments of the page.
    #[serde(default)]
    pub attachment: Option<AttachmentsResponse>,
}

/// Hypermedia links.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Links {
    /// Web UI link.
    #[serde(default)]
    pub webui: Option<String>,
    /// API self link.
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

/// Paged content search response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSearchResult {
    /// Pages on this result page.
    pub results: Vec<ConfluencePage>,
    /// Offset of the first result.
    #[serde(default)]
    pub start: usize,
    /// Requested page size.
    #[serde(default)]
    pub limit: usize,
    /// Number of results on this page.
    #[serde(default)]
    pub size: usize,
}
