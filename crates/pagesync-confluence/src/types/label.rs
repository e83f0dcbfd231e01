//! Confluence label types.

use serde::{Deserialize, Serialize};

/// Label attached to a page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Label {
    /// Label prefix (usually "global").
    #[serde(default)]
    pub prefix: Option<String>,
    /// Label name, the identity used for reconciliation.
    pub name: String,
    /// Label ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Display label.
    #[serde(default)]
    pub label: Option<String>,
}

/// Labels list as embedded in page metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LabelsResponse {
    /// Labels.
    #[serde(default)]
    pub results: Vec<Label>,
}
