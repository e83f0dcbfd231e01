//! Attachment operations for Confluence API.

use tracing::info;

use super::multipart::MultipartForm;
use super::{ConfluenceClient, check_status, encode_segment, read_json};
use crate::error::ConfluenceError;
use crate::types::{Attachment, AttachmentsResponse, PageAttachmentInput};

impl ConfluenceClient {
    /// Upload new attachments to a page in one request.
    pub(crate) fn post_attachments(
        &self,
        page_id: &str,
        attachments: &[PageAttachmentInput],
    ) -> Result<Vec<Attachment>, ConfluenceError> {
        let url = format!(
            "{}/content/{}/child/attachment",
            self.api_url(),
            encode_segment(page_id)
        );

        info!(
            "Uploading {} new attachment(s) to page {}",
            attachments.len(),
            page_id
        );

        let response: AttachmentsResponse = self.send_form(&url, attachments)?;
        Ok(response.results)
    }

    /// Replace the data of an existing attachment.
    pub(crate) fn post_attachment_data(
        &self,
        page_id: &str,
        attachment_id: &str,
        attachment: &PageAttachmentInput,
    ) -> Result<Attachment, ConfluenceError> {
        let url = format!(
            "{}/content/{}/child/attachment/{}/data",
            self.api_url(),
            encode_segment(page_id),
            encode_segment(attachment_id)
        );

        info!(
            "Updating attachment '{}' (id={}) on page {}",
            attachment.name, attachment_id, page_id
        );

        self.send_form(&url, std::slice::from_ref(attachment))
    }

    /// Delete an attachment.
    pub(crate) fn remove_attachment(&self, attachment_id: &str) -> Result<(), ConfluenceError> {
        let url = format!(
            "{}/content/{}",
            self.api_url(),
            encode_segment(attachment_id)
        );

        info!("Deleting attachment {}", attachment_id);

        check_status(self.prepare(self.agent.delete(&url)).call()?)?;
        Ok(())
    }

    /// POST attachments as `multipart/form-data`.
    ///
    /// Each file part is followed by its comment part; Confluence pairs them
    /// by position.
    fn send_form<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        attachments: &[PageAttachmentInput],
    ) -> Result<T, ConfluenceError> {
        let mut form = MultipartForm::new();
        for attachment in attachments {
            let data = std::fs::read(&attachment.content)?;
            form.file(
                "file",
                &attachment.name,
                attachment.content_type.as_deref(),
                &data,
            );
            form.text("comment", attachment.comment.as_deref().unwrap_or_default());
        }
        let (content_type, body) = form.finish();

        let response = self
            .prepare(self.agent.post(url))
            .header("Content-Type", &content_type)
            .header("X-Atlassian-Token", "nocheck")
            .send(&body[..])?;

        read_json(response)
    }
}
