use std::sync::Arc;

use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// The error is `Clone` so that one failed in-flight request can be handed to
/// every caller that was waiting on it.
#[derive(Debug, Clone, Error)]
pub enum AnalyticsError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(Arc<reqwest::Error>),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The data received from the service was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// The configured service base cannot have paths joined onto it (e.g. no scheme).
    #[error("invalid base URL {0}: expected an absolute http(s) URL")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for AnalyticsError {
    fn from(e: reqwest::Error) -> Self {
        AnalyticsError::Http(Arc::new(e))
    }
}
