//! Gazette Web Collaborators
//!
//! Implementations of the `WebSearcher` and `PageFetcher` traits from
//! `gazette-domain`, used by best-effort enrichment.
//!
//! # Implementations
//!
//! - `TavilySearcher`: Tavily search API
//! - `HttpPageFetcher`: plain GET + HTML to readable text
//! - `MockSearcher` / `MockFetcher`: canned results for tests
//!
//! Every call is blocking, bounded by a client timeout and retried under a
//! [`RetryPolicy`]. Callers are expected to run them off the async executor.

#![warn(missing_docs)]

mod error;
mod fetch;
mod mock;
mod retry;
mod search;

pub use error::WebError;
pub use fetch::{html_to_text, HttpPageFetcher};
pub use mock::{MockFetcher, MockSearcher};
pub use retry::RetryPolicy;
pub use search::TavilySearcher;
