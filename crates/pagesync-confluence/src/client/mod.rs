//! Confluence REST API client.
//!
//! Provides a blocking HTTP client for the Confluence Server/Data Center REST
//! API. Requests are authenticated with a personal access token or basic
//! credentials.

mod attachments;
mod labels;
mod multipart;
mod pages;
mod properties;

use std::time::Duration;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use pagesync_config::ConfluenceConfig;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use ureq::http::Response;
use ureq::tls::TlsConfig;
use ureq::{Agent, Body, RequestBuilder};

use crate::api::ConfluenceApi;
use crate::error::ConfluenceError;
use crate::types::{
    Attachment, ConfluencePage, PageAttachmentInput, PageContentInput, PagePropertyInput,
    PageUpdateOptions,
};

/// Characters left unescaped in URL path segments.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Request authentication.
#[derive(Debug, Clone)]
pub enum Auth {
    /// No `Authorization` header.
    Anonymous,
    /// Personal access token.
    Bearer(String),
    /// Username and password.
    Basic {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
}

impl Auth {
    /// `Authorization` header value, if any.
    fn header_value(&self) -> Option<String> {
        match self {
            Self::Anonymous => None,
            Self::Bearer(token) => Some(format!("Bearer {token}")),
            Self::Basic { username, password } => Some(format!(
                "Basic {}",
                BASE64_STANDARD.encode(format!("{username}:{password}"))
            )),
        }
    }
}

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth: Auth,
}

impl ConfluenceClient {
    /// Create a client for `base_url`.
    ///
    /// `skip_ssl` disables TLS certificate verification.
    pub fn new(base_url: &str, auth: Auth, timeout: Duration, skip_ssl: bool) -> Self {
        let mut config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false);
        if skip_ssl {
            config = config.tls_config(TlsConfig::builder().disable_verification(true).build());
        }

        Self {
            agent: config.build().into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth,
        }
    }

    /// Create client from the `[confluence]` config section.
    pub fn from_config(config: &ConfluenceConfig) -> Self {
        let auth = match (&config.token, &config.username, &config.password) {
            (Some(token), _, _) => Auth::Bearer(token.clone()),
            (None, Some(username), Some(password)) => Auth::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            _ => Auth::Anonymous,
        };
        Self::new(
            &config.base_url,
            auth,
            Duration::from_secs(config.timeout_secs),
            config.skip_ssl,
        )
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add authentication and `Accept` headers.
    fn prepare<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        let request = request.header("Accept", "application/json");
        match self.auth.header_value() {
            Some(value) => request.header("Authorization", &value),
            None => request,
        }
    }
}

impl ConfluenceApi for ConfluenceClient {
    fn find_pages(
        &self,
        space: &str,
        title: &str,
        expansions: &[&str],
    ) -> Result<Vec<ConfluencePage>, ConfluenceError> {
        self.search_pages(space, title, expansions)
    }

    fn create_page(
        &self,
        value: &PageContentInput,
        options: &PageUpdateOptions,
        expansions: &[&str],
    ) -> Result<ConfluencePage, ConfluenceError> {
        self.post_page(value, options, expansions)
    }

    fn update_page(
        &self,
        page_id: &str,
        value: &PageContentInput,
        options: &PageUpdateOptions,
    ) -> Result<ConfluencePage, ConfluenceError> {
        self.put_page(page_id, value, options)
    }

    fn set_page_property(
        &self,
        page_id: &str,
        name: &str,
        value: &PagePropertyInput,
    ) -> Result<(), ConfluenceError> {
        self.put_property(page_id, name, value)
    }

    fn add_labels(&self, page_id: &str, labels: &[String]) -> Result<(), ConfluenceError> {
        self.post_labels(page_id, labels)
    }

    fn delete_label(&self, page_id: &str, label: &str) -> Result<(), ConfluenceError> {
        self.remove_label(page_id, label)
    }

    fn add_attachments(
        &self,
        page_id: &str,
        attachments: &[PageAttachmentInput],
    ) -> Result<Vec<Attachment>, ConfluenceError> {
        self.post_attachments(page_id, attachments)
    }

    fn update_attachment(
        &self,
        page_id: &str,
        attachment_id: &str,
        attachment: &PageAttachmentInput,
    ) -> Result<Attachment, ConfluenceError> {
        self.post_attachment_data(page_id, attachment_id, attachment)
    }

    fn delete_attachment(&self, attachment_id: &str) -> Result<(), ConfluenceError> {
        self.remove_attachment(attachment_id)
    }

    fn find_child_pages(
        &self,
        page_id: &str,
        expansions: &[&str],
    ) -> Result<Vec<ConfluencePage>, ConfluenceError> {
        self.child_pages(page_id, expansions)
    }

    fn delete_page(&self, page_id: &str) -> Result<(), ConfluenceError> {
        self.remove_page(page_id)
    }
}

/// Percent-encode a value for use as a URL path segment.
fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Return the response body, or the mapped error for a failure status.
fn check_status(response: Response<Body>) -> Result<Body, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::from_status(status, error_body));
    }

    Ok(body)
}

/// Decode a successful JSON response.
fn read_json<T: DeserializeOwned>(response: Response<Body>) -> Result<T, ConfluenceError> {
    Ok(check_status(response)?.read_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let auth = Auth::Bearer("pat".to_owned());
        assert_eq!(auth.header_value().as_deref(), Some("Bearer pat"));
    }

    #[test]
    fn test_basic_header() {
        let auth = Auth::Basic {
            username: "user".to_owned(),
            password: "pass".to_owned(),
        };
        assert_eq!(auth.header_value().as_deref(), Some("Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn test_anonymous_header() {
        assert!(Auth::Anonymous.header_value().is_none());
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("my label"), "my%20label");
        assert_eq!(encode_segment("release-1.0_x~"), "release-1.0_x~");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ConfluenceClient::new(
            "https://wiki.example.com/",
            Auth::Anonymous,
            Duration::from_secs(5),
            false,
        );
        assert_eq!(client.base_url(), "https://wiki.example.com");
        assert_eq!(client.api_url(), "https://wiki.example.com/rest/api");
    }

    #[test]
    fn test_from_config_prefers_token() {
        let config = ConfluenceConfig {
            base_url: "https://wiki.example.com".to_owned(),
            token: Some("pat".to_owned()),
            username: None,
            password: None,
            skip_ssl: true,
            timeout_secs: 10,
        };
        let client = ConfluenceClient::from_config(&config);
        assert!(matches!(client.auth, Auth::Bearer(ref t) if t == "pat"));
    }
}
