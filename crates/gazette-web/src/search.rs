//! Tavily-backed web search

use crate::{RetryPolicy, WebError};
use gazette_domain::traits::{SearchHit, WebSearcher};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Tavily search endpoint
pub const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Default timeout for a search request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Web searcher backed by the Tavily API
pub struct TavilySearcher {
    api_key: String,
    endpoint: String,
    client: reqwest::blocking::Client,
    retry: RetryPolicy,
}

impl TavilySearcher {
    /// Create a searcher with the default endpoint and timeout
    pub fn new(api_key: impl Into<String>) -> Result<Self, WebError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(WebError::NotConfigured("Tavily API key is empty".to_string()));
        }
        Ok(Self {
            api_key,
            endpoint: TAVILY_ENDPOINT.to_string(),
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            retry: RetryPolicy::default(),
        })
    }

    /// Point the searcher at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, WebError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Set the attempts per search (at least 1)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry = RetryPolicy::new(max_retries, self.retry.backoff());
        self
    }

    /// Set the linear backoff step
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.retry = RetryPolicy::new(self.retry.max_retries(), backoff);
        self
    }

    /// Retry policy in effect
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    fn attempt(&self, request: &TavilyRequest<'_>) -> Result<TavilyResponse, WebError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()?;

        if !response.status().is_success() {
            return Err(WebError::Status {
                status: response.status().as_u16(),
                url: self.endpoint.clone(),
            });
        }

        Ok(response.json()?)
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client, WebError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| WebError::NotConfigured(format!("HTTP client: {}", e)))
}

impl WebSearcher for TavilySearcher {
    type Error = WebError;

    fn search(&self, query: &str, result_count: usize) -> Result<Vec<SearchHit>, Self::Error> {
        let request = TavilyRequest {
            query,
            search_depth: "basic",
            max_results: result_count,
        };

        let body = self.retry.run(&self.endpoint, || self.attempt(&request))?;
        debug!("search '{}' returned {} results", query, body.results.len());

        Ok(body
            .results
            .into_iter()
            .take(result_count)
            .map(|r| SearchHit {
                title: r.title.unwrap_or_default(),
                link: r.url,
                snippet: r.content.unwrap_or_default(),
            })
            .collect())
    }
}
