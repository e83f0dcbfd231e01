//! Error types for Confluence API operations.

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// The addressed resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Stale version number sent for a page or property.
    #[error("version conflict: {0}")]
    VersionConflict(String),

    /// Request rejected before it was sent.
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// I/O error (reading attachment files).
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl ConfluenceError {
    /// Map an error status code and body to an error.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => Self::NotFound(body),
            409 => Self::VersionConflict(body),
            _ => Self::HttpResponse { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_not_found() {
        let err = ConfluenceError::from_status(404, "No content found".to_owned());
        assert!(matches!(err, ConfluenceError::NotFound(ref body) if body == "No content found"));
    }

    #[test]
    fn test_from_status_conflict() {
        let err = ConfluenceError::from_status(409, "Version must be incremented".to_owned());
        assert!(matches!(err, ConfluenceError::VersionConflict(_)));
    }

    #[test]
    fn test_from_status_other() {
        let err = ConfluenceError::from_status(500, "boom".to_owned());
        assert_eq!(err.to_string(), "HTTP error: 500 - boom");
    }
}
