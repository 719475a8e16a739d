//! OpenAI-compatible chat completions provider
//!
//! Serves both remote summarization tiers: Groq exposes the same
//! `/chat/completions` surface as OpenAI, so the tiers differ only in endpoint,
//! key and model.
//!
//! # Features
//!
//! - Blocking HTTP with a per-request timeout
//! - Fixed attempt count with linear backoff (`backoff * attempt`)
//! - JSON object mode for structured generation
//!
//! # Examples
//!
//! ```no_run
//! use gazette_llm::ChatCompletionsProvider;
//! use gazette_domain::traits::LlmProvider;
//!
//! # fn main() -> Result<(), gazette_llm::LlmError> {
//! let provider = ChatCompletionsProvider::groq("gsk_...", "llama-3.1-8b-instant")?;
//! let reply = provider.generate("Say hello")?;
//! # Ok(())
//! # }
//! ```

use crate::LlmError;
use gazette_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Groq's OpenAI-compatible chat endpoint
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// OpenAI chat endpoint
pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default timeout for a single HTTP request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Default number of attempts per generation
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default linear backoff step (seconds)
pub const DEFAULT_BACKOFF_SECS: u64 = 3;

/// Default completion budget
pub const DEFAULT_MAX_TOKENS: u32 = 900;

/// Chat completions provider for remote summarization tiers
pub struct ChatCompletionsProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
    max_retries: u32,
    backoff: Duration,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsProvider {
    /// Create a provider for any OpenAI-compatible endpoint
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::NotConfigured`] when the key or model is blank, or
    /// when the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        let model = model.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::NotConfigured("API key is empty".to_string()));
        }
        if model.trim().is_empty() {
            return Err(LlmError::NotConfigured("model name is empty".to_string()));
        }

        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            endpoint: endpoint.into(),
            model,
            api_key,
            client: build_client(timeout)?,
            timeout,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Duration::from_secs(DEFAULT_BACKOFF_SECS),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Provider pointed at Groq
    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(GROQ_ENDPOINT, model, api_key)
    }

    /// Provider pointed at OpenAI
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(OPENAI_ENDPOINT, model, api_key)
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = build_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// Set the maximum number of attempts (at least one is always made)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the linear backoff step
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set the completion token budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Endpoint this provider posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn complete(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
            max_tokens: self.max_tokens,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.attempt(&request) {
                Ok(content) => return Ok(content),
                Err(e) if is_retryable(&e) => {
                    warn!(
                        "[{}] attempt {}/{} failed: {}",
                        self.model, attempt, self.max_retries, e
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }

            if attempt < self.max_retries {
                // Linear backoff: 1x, 2x, 3x the step
                std::thread::sleep(self.backoff * attempt);
            }
        }

        Err(last_error.unwrap_or_else(|| {
            LlmError::Communication("Max retries exceeded".to_string())
        }))
    }

    fn attempt(&self, request: &ChatRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(e.to_string())
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        debug!("[{}] status {}", self.model, status);

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            let snippet: String = body.chars().take(300).collect();
            return Err(LlmError::Status {
                status,
                message: snippet,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("response has no message content".to_string()))
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client, LlmError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::NotConfigured(format!("HTTP client: {}", e)))
}

/// Transport failures, timeouts, throttling and server errors are worth
/// another attempt; client errors and bad payloads are not.
fn is_retryable(error: &LlmError) -> bool {
    match error {
        LlmError::Timeout(_) | LlmError::RateLimitExceeded | LlmError::Communication(_) => true,
        LlmError::Status { status, .. } => !status.is_client_error(),
        _ => false,
    }
}

impl LlmProviderTrait for ChatCompletionsProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt, false)
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        // JSON object mode; the schema itself travels inside the prompt
        self.complete(prompt, true)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = ChatCompletionsProvider::groq("key", "llama-3.1-8b-instant").unwrap();
        assert_eq!(provider.endpoint(), GROQ_ENDPOINT);
        assert_eq!(provider.model_name(), "llama-3.1-8b-instant");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(provider.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_openai_preset() {
        let provider = ChatCompletionsProvider::openai("key", "gpt-4o-mini").unwrap();
        assert_eq!(provider.endpoint(), OPENAI_ENDPOINT);
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        let result = ChatCompletionsProvider::groq("  ", "model");
        assert!(matches!(result, Err(LlmError::NotConfigured(_))));
    }

    #[test]
    fn test_builders() {
        let provider = ChatCompletionsProvider::groq("key", "m")
            .unwrap()
            .with_max_retries(0)
            .with_backoff(Duration::from_millis(5))
            .with_max_tokens(100)
            .with_timeout(Duration::from_secs(2))
            .unwrap();
        assert_eq!(provider.max_retries, 1);
        assert_eq!(provider.backoff, Duration::from_millis(5));
        assert_eq!(provider.max_tokens, 100);
        assert_eq!(provider.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_retry_classification() {
        assert!(is_retryable(&LlmError::Timeout("t".into())));
        assert!(is_retryable(&LlmError::RateLimitExceeded));
        assert!(is_retryable(&LlmError::Communication("Request failed: refused".into())));
        assert!(is_retryable(&LlmError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            message: "x".into(),
        }));
        assert!(!is_retryable(&LlmError::Status {
            status: reqwest::StatusCode::UNAUTHORIZED,
            message: "x".into(),
        }));
        assert!(!is_retryable(&LlmError::InvalidResponse("x".into())));
    }

    #[test]
    fn test_client_error_message_text_does_not_drive_retries() {
        // A transport error whose text happens to start like a status line
        let transport = LlmError::Communication("HTTP 4xx proxy reset".into());
        assert!(is_retryable(&transport));

        let bad_request = LlmError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            message: "server overloaded, try later".into(),
        };
        assert!(!is_retryable(&bad_request));
        assert_eq!(bad_request.to_string(), "HTTP 400 Bad Request: server overloaded, try later");
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "m",
            messages: vec![ChatMessage { role: "user", content: "hi" }],
            temperature: 0.0,
            max_tokens: 10,
            response_format: Some(ResponseFormat { kind: "json_object" }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_unreachable_endpoint_is_communication_error() {
        // Port 9 (discard) on localhost is normally closed
        let provider = ChatCompletionsProvider::new("http://127.0.0.1:9/v1/chat", "m", "k")
            .unwrap()
            .with_max_retries(1);
        let result = provider.generate("test");
        assert!(matches!(
            result,
            Err(LlmError::Communication(_)) | Err(LlmError::Timeout(_))
        ));
    }
}
