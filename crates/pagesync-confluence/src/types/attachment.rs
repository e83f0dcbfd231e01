//! Confluence attachment types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Confluence attachment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Attachment {
    /// Attachment ID.
    pub id: String,
    /// Attachment title/filename.
    pub title: String,
    /// Free-form metadata (`comment`, `mediaType`, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Attachment {
    /// Attachment comment text.
    pub fn comment(&self) -> Option<&str> {
        self.metadata.get("comment").and_then(serde_json::Value::as_str)
    }
}

/// Attachments API response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AttachmentsResponse {
    /// List of attachments.
    pub results: Vec<Attachment>,
}
