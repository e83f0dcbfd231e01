//! Request payloads sent to Confluence.

use std::path::PathBuf;

use serde_json::{Value, json};

/// Page content for create and update calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContentInput {
    /// Parent page ID.
    pub parent_page: Option<String>,
    /// Page title.
    pub title: String,
    /// Storage-format body.
    pub content: String,
    /// Space key (required for create, omitted on update).
    pub space: Option<String>,
    /// Version number this write creates.
    pub version: u32,
}

impl PageContentInput {
    /// Input for a page that does not exist yet.
    pub fn create(parent_page: &str, title: &str, content: &str, space: &str) -> Self {
        Self {
            parent_page: Some(parent_page.to_owned()),
            title: title.to_owned(),
            content: content.to_owned(),
            space: Some(space.to_owned()),
            version: 1,
        }
    }

    /// Input for the next version of an existing page.
    pub fn update(parent_page: &str, title: &str, content: &str, version: u32) -> Self {
        Self {
            parent_page: Some(parent_page.to_owned()),
            title: title.to_owned(),
            content: content.to_owned(),
            space: None,
            version,
        }
    }

    /// JSON request body for `POST /content` and `PUT /content/{id}`.
    pub(crate) fn to_payload(&self, options: &PageUpdateOptions) -> Value {
        let mut payload = json!({
            "type": "page",
            "title": self.title,
            "body": {
                "storage": {
                    "value": self.content,
                    "representation": "storage"
                }
            },
            "version": {
                "number": self.version,
                "minorEdit": !options.notify_watchers
            }
        });

        if let Some(parent) = &self.parent_page {
            payload["ancestors"] = json!([{ "id": parent }]);
        }
        if let Some(message) = &options.message {
            payload["version"]["message"] = json!(message);
        }
        if let Some(space) = &self.space {
            payload["space"] = json!({ "key": space });
        }
        payload
    }
}

/// Version options for create and update calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUpdateOptions {
    /// Notify watchers (a non-minor edit).
    pub notify_watchers: bool,
    /// Version message.
    pub message: Option<String>,
}

/// Attachment upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAttachmentInput {
    /// Attachment filename on the page.
    pub name: String,
    /// Local file holding the content.
    pub content: PathBuf,
    /// Attachment comment.
    pub comment: Option<String>,
    /// MIME type, omitted from the upload when unknown.
    pub content_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_payload() {
        let input = PageContentInput::create("parentId", "Page title", "body", "TEST");
        let options = PageUpdateOptions {
            notify_watchers: false,
            message: Some("create-page".to_owned()),
        };

        assert_eq!(
            input.to_payload(&options),
            json!({
                "type": "page",
                "ancestors": [{"id": "parentId"}],
                "title": "Page title",
                "body": {"storage": {"value": "body", "representation": "storage"}},
                "version": {"number": 1, "minorEdit": true, "message": "create-page"},
                "space": {"key": "TEST"}
            })
        );
    }

    #[test]
    fn test_update_payload_omits_space_and_message() {
        let input = PageContentInput::update("parentId", "Page title", "body", 43);
        let options = PageUpdateOptions {
            notify_watchers: true,
            message: None,
        };

        let payload = input.to_payload(&options);
        assert_eq!(payload["version"], json!({"number": 43, "minorEdit": false}));
        assert!(payload.get("space").is_none());
    }
}
