//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while interpreting remote model output
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Response does not have the expected shape
    #[error("Invalid candidate format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
