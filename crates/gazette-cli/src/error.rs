//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline configuration rejected
    #[error("Pipeline configuration error: {0}")]
    Pipeline(#[from] gazette_pipeline::ConfigError),

    /// Remote model provider could not be built
    #[error("Provider error: {0}")]
    Provider(#[from] gazette_llm::LlmError),

    /// Web collaborator could not be built
    #[error("Web error: {0}")]
    Web(#[from] gazette_web::WebError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
