//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the remote
//! collaborators it consults. Calls are synchronous and must be bounded by a
//! timeout inside the implementation; the pipeline adds an outer timeout of
//! its own.

/// Trait for language model provider operations
///
/// Implemented by the infrastructure layer (gazette-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output (JSON object mode, if supported)
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;

    /// Model identifier, for diagnostics
    fn model_name(&self) -> &str;
}

/// One hit returned by a web search collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Page title
    pub title: String,

    /// Page URL
    pub link: String,

    /// Short excerpt supplied by the search API
    pub snippet: String,
}

impl SearchHit {
    /// Create a hit from its three parts
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
        }
    }
}

/// Trait for web search used by enrichment
///
/// Implemented by the infrastructure layer (gazette-web)
pub trait WebSearcher {
    /// Error type for search operations
    type Error;

    /// Search the web, returning at most `result_count` hits
    fn search(&self, query: &str, result_count: usize) -> Result<Vec<SearchHit>, Self::Error>;
}

/// Trait for fetching a page's readable text
///
/// Implemented by the infrastructure layer (gazette-web)
pub trait PageFetcher {
    /// Error type for fetch operations
    type Error;

    /// Fetch `url` and return its readable body text
    fn fetch_text(&self, url: &str) -> Result<String, Self::Error>;
}
