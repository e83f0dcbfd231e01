//! Content property operations for Confluence API.

use serde_json::json;
use tracing::debug;

use super::{ConfluenceClient, check_status, encode_segment};
use crate::error::ConfluenceError;
use crate::types::PagePropertyInput;

impl ConfluenceClient {
    /// Write a page property at `value.version`.
    pub(crate) fn put_property(
        &self,
        page_id: &str,
        name: &str,
        value: &PagePropertyInput,
    ) -> Result<(), ConfluenceError> {
        let url = format!(
            "{}/content/{}/property/{}",
            self.api_url(),
            encode_segment(page_id),
            encode_segment(name)
        );
        let payload = serde_json::to_vec(&json!({
            "key": name,
            "value": value.value,
            "version": {"number": value.version.number}
        }))?;

        debug!(
            "Setting property '{}' of page {} (version {})",
            name, page_id, value.version.number
        );

        let response = self
            .prepare(self.agent.put(&url))
            .header("Content-Type", "application/json")
            .send(&payload[..])?;
        check_status(response)?;
        Ok(())
    }
}
