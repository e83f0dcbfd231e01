//! Page operations for Confluence API.

use tracing::{debug, info};

use super::{ConfluenceClient, check_status, encode_segment, read_json};
use crate::error::ConfluenceError;
use crate::types::{ConfluencePage, PageContentInput, PageSearchResult, PageUpdateOptions};

/// Page size for paginated child listings.
const PAGE_SIZE: usize = 100;

impl ConfluenceClient {
    /// Find pages by space and exact title.
    pub(crate) fn search_pages(
        &self,
        space: &str,
        title: &str,
        expand: &[&str],
    ) -> Result<Vec<ConfluencePage>, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        debug!("Searching page '{}' in space {}", title, space);

        let mut request = self
            .prepare(self.agent.get(&url))
            .query("spaceKey", space)
            .query("title", title);
        if !expand.is_empty() {
            request = request.query("expand", expand.join(","));
        }

        let result: PageSearchResult = read_json(request.call()?)?;
        Ok(result.results)
    }

    /// Create a new page.
    pub(crate) fn post_page(
        &self,
        value: &PageContentInput,
        options: &PageUpdateOptions,
        expand: &[&str],
    ) -> Result<ConfluencePage, ConfluenceError> {
        if value.space.as_deref().is_none_or(str::is_empty) {
            return Err(ConfluenceError::InvalidInput(
                "space is required when creating pages".to_owned(),
            ));
        }

        let url = format!("{}/content", self.api_url());
        let payload = serde_json::to_vec(&value.to_payload(options))?;

        info!("Creating page '{}'", value.title);

        let mut request = self
            .prepare(self.agent.post(&url))
            .header("Content-Type", "application/json");
        if !expand.is_empty() {
            request = request.query("expand", expand.join(","));
        }

        let page: ConfluencePage = read_json(request.send(&payload[..])?)?;
        info!("Created page '{}' with id {}", page.title, page.id);
        Ok(page)
    }

    /// Update an existing page to `value.version`.
    pub(crate) fn put_page(
        &self,
        page_id: &str,
        value: &PageContentInput,
        options: &PageUpdateOptions,
    ) -> Result<ConfluencePage, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), encode_segment(page_id));
        let payload = serde_json::to_vec(&value.to_payload(options))?;

        info!("Updating page {} to version {}", page_id, value.version);

        let response = self
            .prepare(self.agent.put(&url))
            .header("Content-Type", "application/json")
            .send(&payload[..])?;

        read_json(response)
    }

    /// List all direct children of a page, following pagination.
    pub(crate) fn child_pages(
        &self,
        page_id: &str,
        expand: &[&str],
    ) -> Result<Vec<ConfluencePage>, ConfluenceError> {
        let url = format!(
            "{}/content/{}/child/page",
            self.api_url(),
            encode_segment(page_id)
        );

        let mut pages = Vec::new();
        let mut start = 0;
        let mut limit = PAGE_SIZE;
        loop {
            debug!("Listing children of page {} from {}", page_id, start);

            let mut request = self
                .prepare(self.agent.get(&url))
                .query("start", start.to_string())
                .query("limit", limit.to_string());
            if !expand.is_empty() {
                request = request.query("expand", expand.join(","));
            }

            let result: PageSearchResult = read_json(request.call()?)?;
            let size = result.results.len();
            pages.extend(result.results);

            // The server may cap the requested limit
            if result.limit > 0 {
                limit = result.limit;
            }
            if size < limit {
                break;
            }
            start += size;
        }
        Ok(pages)
    }

    /// Delete a page.
    pub(crate) fn remove_page(&self, page_id: &str) -> Result<(), ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), encode_segment(page_id));

        info!("Deleting page {}", page_id);

        check_status(self.prepare(self.agent.delete(&url)).call()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::Auth;

    fn unreachable_client() -> ConfluenceClient {
        ConfluenceClient::new(
            "http://confluence.invalid",
            Auth::Anonymous,
            Duration::from_secs(1),
            false,
        )
    }

    #[test]
    fn test_post_page_requires_space() {
        let client = unreachable_client();
        let options = PageUpdateOptions {
            notify_watchers: false,
            message: None,
        };

        for space in [None, Some(String::new())] {
            let input = PageContentInput {
                space: space.clone(),
                ..PageContentInput::create("1", "Page", "<p>body</p>", "TEST")
            };

            let err = client.post_page(&input, &options, &[]).unwrap_err();

            assert!(
                matches!(err, ConfluenceError::InvalidInput(ref m) if m.contains("space")),
                "{space:?}: {err:?}"
            );
        }
    }
}
