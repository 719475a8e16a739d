//! Canned collaborators for tests

use crate::{RetryPolicy, WebError};
use gazette_domain::traits::{PageFetcher, SearchHit, WebSearcher};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Search collaborator returning the same hits for every query
///
/// Each attempt is recorded in [`MockSearcher::queries`]. Attempts go
/// through the same [`RetryPolicy`] the live searcher uses, one attempt by
/// default.
#[derive(Debug, Clone)]
pub struct MockSearcher {
    hits: Vec<SearchHit>,
    failures_left: Arc<Mutex<usize>>,
    retry: RetryPolicy,
    queries: Arc<Mutex<Vec<String>>>,
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self {
            hits: Vec::new(),
            failures_left: Arc::new(Mutex::new(0)),
            retry: RetryPolicy::new(1, std::time::Duration::ZERO),
            queries: Arc::default(),
        }
    }
}

impl MockSearcher {
    /// Searcher returning `hits` (truncated to the requested count)
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            ..Self::default()
        }
    }

    /// Searcher whose every attempt fails
    pub fn failing() -> Self {
        Self::default().failing_first(usize::MAX)
    }

    /// Fail the next `attempts` attempts with a transient error
    pub fn failing_first(self, attempts: usize) -> Self {
        *self.failures_left.lock().unwrap() = attempts;
        self
    }

    /// Retry failed attempts under `policy`
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl WebSearcher for MockSearcher {
    type Error = WebError;

    fn search(&self, query: &str, result_count: usize) -> Result<Vec<SearchHit>, Self::Error> {
        self.retry.run("mock-search", || {
            self.queries.lock().unwrap().push(query.to_string());
            let mut failures_left = self.failures_left.lock().unwrap();
            if *failures_left > 0 {
                *failures_left -= 1;
                return Err(WebError::Http("mock search failure".to_string()));
            }
            Ok(self.hits.iter().take(result_count).cloned().collect())
        })
    }
}

/// Page collaborator serving text from an in-memory map
///
/// URLs not in the map fail with [`WebError::Status`] 404.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    /// Create an empty fetcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` for `url`
    pub fn with_page(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.pages.insert(url.into(), text.into());
        self
    }

    /// URLs requested so far
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl PageFetcher for MockFetcher {
    type Error = WebError;

    fn fetch_text(&self, url: &str) -> Result<String, Self::Error> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| WebError::Status {
            status: 404,
            url: url.to_string(),
        })
    }
}
