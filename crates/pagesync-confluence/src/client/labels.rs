//! Label operations for Confluence API.

use serde_json::json;
use tracing::info;

use super::{ConfluenceClient, check_status, encode_segment};
use crate::error::ConfluenceError;

impl ConfluenceClient {
    /// Add labels to a page.
    pub(crate) fn post_labels(&self, page_id: &str, labels: &[String]) -> Result<(), ConfluenceError> {
        let url = format!(
            "{}/content/{}/label",
            self.api_url(),
            encode_segment(page_id)
        );
        let body: Vec<_> = labels
            .iter()
            .map(|name| json!({"prefix": "global", "name": name}))
            .collect();
        let payload = serde_json::to_vec(&body)?;

        info!("Adding labels {:?} to page {}", labels, page_id);

        let response = self
            .prepare(self.agent.post(&url))
            .header("Content-Type", "application/json")
            .send(&payload[..])?;
        check_status(response)?;
        Ok(())
    }

    /// Remove a label from a page.
    pub(crate) fn remove_label(&self, page_id: &str, label: &str) -> Result<(), ConfluenceError> {
        let url = format!(
            "{}/content/{}/label/{}",
            self.api_url(),
            encode_segment(page_id),
            encode_segment(label)
        );

        info!("Deleting label '{}' from page {}", label, page_id);

        check_status(self.prepare(self.agent.delete(&url)).call()?)?;
        Ok(())
    }
}
