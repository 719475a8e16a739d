//! Error types for web collaborators

use thiserror::Error;

/// Errors that can occur while searching or fetching
#[derive(Error, Debug)]
pub enum WebError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request exceeded its time budget
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-success status code
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Response body could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Page yielded no readable text
    #[error("No readable text at {0}")]
    EmptyPage(String),

    /// Collaborator is missing required settings
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl WebError {
    /// Transport failures, timeouts, throttling and server errors are worth
    /// another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            WebError::Http(_) | WebError::Timeout(_) => true,
            WebError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for WebError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            WebError::Timeout(e.to_string())
        } else {
            WebError::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for WebError {
    fn from(e: serde_json::Error) -> Self {
        WebError::InvalidResponse(e.to_string())
    }
}
