//! Retrieval errors.

use thiserror::Error;

/// Errors that abort a registry fetch. No partial results survive an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Transport failure: connection, TLS, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// The registry answered with a non-success status.
    #[error("registry returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response body was not the expected JSON document.
    #[error("malformed registry response: {0}")]
    JsonParse(String),

    /// The registry kept returning page tokens past the configured bound.
    #[error("pagination did not finish within {max_pages} pages")]
    PageLimitExceeded {
        /// Configured page bound.
        max_pages: usize,
    },

    /// The configured base URL or query could not form a request URL.
    #[error("invalid registry url: {0}")]
    InvalidUrl(String),
}

// The request URL carries the patient's condition, so it never reaches the
// message.
impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
