//! Change detection strategies.

use pagesync_config::ChangeDetectorKind;
use pagesync_confluence::types::ConfluencePage;

use crate::HASH_PROPERTY;
use crate::page::DesiredPage;

/// Expansions every page lookup requests.
pub const BASELINE_EXPANSIONS: [&str; 5] = [
    "metadata.labels",
    "metadata.properties.contenthash",
    "metadata.properties.editor",
    "version",
    "children.attachment",
];

/// Decides whether a page body needs uploading.
///
/// Both variants give the same answer for a page last written by pagesync,
/// so either can be used interchangeably.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDetector {
    /// Compare the stored `contenthash` property with the local hash.
    Hash,
    /// Compare the stored body with the local body.
    Content,
}

impl ChangeDetector {
    /// Every detector variant.
    pub const ALL: [Self; 2] = [Self::Hash, Self::Content];

    /// Expansions this detector needs on top of the baseline.
    pub fn extra_expansions(self) -> &'static [&'static str] {
        match self {
            Self::Hash => &["metadata.properties.contenthash"],
            Self::Content => &["body.storage"],
        }
    }

    /// Baseline plus this detector's expansions, without duplicates.
    pub fn lookup_expansions(self) -> Vec<&'static str> {
        let mut expansions = BASELINE_EXPANSIONS.to_vec();
        for extra in self.extra_expansions() {
            if !expansions.contains(extra) {
                expansions.push(extra);
            }
        }
        expansions
    }

    /// Whether `remote` differs from `desired`.
    ///
    /// `remote` must have been fetched with [`lookup_expansions`](Self::lookup_expansions).
    pub fn is_changed(self, remote: &ConfluencePage, desired: &DesiredPage) -> bool {
        match self {
            Self::Hash => {
                remote.property(HASH_PROPERTY).and_then(|p| p.value_str())
                    != Some(desired.content_hash.as_str())
            }
            Self::Content => remote.storage_body() != Some(desired.body.as_str()),
        }
    }
}

impl From<ChangeDetectorKind> for ChangeDetector {
    fn from(kind: ChangeDetectorKind) -> Self {
        match kind {
            ChangeDetectorKind::Hash => Self::Hash,
            ChangeDetectorKind::Content => Self::Content,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pagesync_confluence::types::{
        Body, PageMetadata, PageProperty, PropertyVersion, Storage,
    };
    use pretty_assertions::assert_eq;

    use super::*;

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

    fn with_hash(hash: &str) -> ConfluencePage {
        let mut properties = BTreeMap::new();
        properties.insert(
            HASH_PROPERTY.to_owned(),
            PageProperty {
                id: "1".to_owned(),
                key: HASH_PROPERTY.to_owned(),
                value: serde_json::Value::String(hash.to_owned()),
                version: PropertyVersion { number: 1 },
            },
        );
        ConfluencePage {
            id: "1".to_owned(),
            metadata: Some(PageMetadata {
                labels: None,
                properties: Some(properties),
            }),
            ..ConfluencePage::default()
        }
    }

    fn with_body(body: &str) -> ConfluencePage {
        ConfluencePage {
            id: "1".to_owned(),
            body: Some(Body {
                storage: Some(Storage {
                    value: body.to_owned(),
                    representation: "storage".to_owned(),
                }),
            }),
            ..ConfluencePage::default()
        }
    }

    #[test]
    fn test_hash_lookup_expansions() {
        assert_eq!(
            ChangeDetector::Hash.lookup_expansions(),
            BASELINE_EXPANSIONS.to_vec()
        );
    }

    #[test]
    fn test_content_lookup_expansions() {
        let expansions = ChangeDetector::Content.lookup_expansions();
        assert_eq!(expansions.len(), 6);
        assert_eq!(expansions.last(), Some(&"body.storage"));
    }

    #[test]
    fn test_hash_detector() {
        let detector = ChangeDetector::Hash;
        assert!(!detector.is_changed(&with_hash("body-hash"), &desired()));
        assert!(detector.is_changed(&with_hash("abc"), &desired()));
        assert!(detector.is_changed(&ConfluencePage::default(), &desired()));
    }

    #[test]
    fn test_content_detector() {
        let detector = ChangeDetector::Content;
        assert!(!detector.is_changed(&with_body("body"), &desired()));
        assert!(detector.is_changed(&with_body("body "), &desired()));
        assert!(detector.is_changed(&ConfluencePage::default(), &desired()));
    }

    #[test]
    fn test_from_kind() {
        assert_eq!(
            ChangeDetector::from(ChangeDetectorKind::Content),
            ChangeDetector::Content
        );
        assert_eq!(
            ChangeDetector::from(ChangeDetectorKind::Hash),
            ChangeDetector::Hash
        );
    }
}
