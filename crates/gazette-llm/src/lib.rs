//! Gazette LLM Provider Layer
//!
//! Pluggable language model providers behind the `LlmProvider` trait from
//! `gazette-domain`. Both remote summarization tiers talk to an
//! OpenAI-compatible chat completions API; only the endpoint, key and model
//! differ.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `ChatCompletionsProvider`: Groq / OpenAI chat completions over HTTP
//!
//! # Examples
//!
//! ```
//! use gazette_llm::MockProvider;
//! use gazette_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("{\"include\": true}");
//! let result = provider.generate("any prompt").unwrap();
//! assert_eq!(result, "{\"include\": true}");
//! ```

#![warn(missing_docs)]

pub mod chat;

use gazette_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use chat::ChatCompletionsProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Request exceeded its time budget
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Endpoint answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        /// Response status
        status: reqwest::StatusCode,
        /// Leading part of the response body
        message: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider is missing required settings (API key, endpoint)
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Specific responses are keyed by a needle: the first registered needle
/// contained in the prompt wins, otherwise the default response is used.
///
/// # Examples
///
/// ```
/// use gazette_llm::MockProvider;
/// use gazette_domain::traits::LlmProvider;
///
/// let mut provider = MockProvider::new("fallback");
/// provider.add_response("Budget", "budget reply");
/// assert_eq!(provider.generate("Article title: Budget 2025").unwrap(), "budget reply");
/// assert_eq!(provider.generate("Article title: Monsoon").unwrap(), "fallback");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Scripted,
    responses: Arc<Mutex<Vec<(String, Scripted)>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    model_name: String,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Scripted::Reply(response.into()),
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            model_name: "mock".to_string(),
        }
    }

    /// Create a provider that fails every call
    pub fn failing() -> Self {
        Self {
            default_response: Scripted::Fail,
            ..Self::new("")
        }
    }

    /// Set the reported model name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Respond with `response` to any prompt containing `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((needle.into(), Scripted::Reply(response.into())));
    }

    /// Fail any prompt containing `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((needle.into(), Scripted::Fail));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        self.prompts.lock().unwrap().clear();
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        let scripted = responses
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, scripted)| scripted)
            .unwrap_or(&self.default_response);

        match scripted {
            Scripted::Reply(text) => Ok(text.clone()),
            Scripted::Fail => Err(LlmError::Other("Mock error".to_string())),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt)
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.respond(prompt)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
