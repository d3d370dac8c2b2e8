//! Fetch error types.

use thiserror::Error;

/// Errors that can occur when looking up products or stock.
///
/// "Not found" is not an error: lookups return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    Request(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-success HTTP response other than 404.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Request timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Failed to decode the response body.
    #[error("Failed to parse response: {0}")]
    Deserialization(String),

    /// Failed to read a local catalog document.
    #[error("Failed to load catalog: {0}")]
    Load(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_decode() {
            FetchError::Deserialization(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}
