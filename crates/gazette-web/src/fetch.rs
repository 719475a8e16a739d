//! Page fetching and HTML to readable text

use crate::{RetryPolicy, WebError};
use gazette_domain::traits::PageFetcher;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

/// Default timeout for a page fetch (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 12;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; gazette/0.1)";

static RE_NOISE_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript|nav|header|footer|aside|form)\b[^>]*>.*?</(script|style|noscript|nav|header|footer|aside|form)>").unwrap()
});
static RE_COMMENTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static RE_BLOCK_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|tr|section|article|blockquote)>").unwrap()
});
static RE_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_INLINE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\x{a0}]+").unwrap());
static RE_MULTI_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Convert HTML to readable plain text
///
/// Drops scripts, styles and page chrome (nav, header, footer, aside,
/// forms), turns block-level closers into line breaks, strips the remaining
/// tags and decodes the common entities. Good enough for feeding the
/// normalizer; not a full readability engine.
pub fn html_to_text(html: &str) -> String {
    let text = RE_NOISE_BLOCKS.replace_all(html, " ");
    let text = RE_COMMENTS.replace_all(&text, " ");
    let text = RE_BLOCK_BREAKS.replace_all(&text, "\n");
    let text = RE_TAGS.replace_all(&text, " ");

    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&rsquo;", "’")
        .replace("&lsquo;", "‘")
        .replace("&#8377;", "₹");

    let lines: Vec<String> = text
        .lines()
        .map(|line| RE_INLINE_SPACE.replace_all(line.trim(), " ").into_owned())
        .collect();

    RE_MULTI_NEWLINE
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}

/// Fetches pages over plain HTTP GET
pub struct HttpPageFetcher {
    client: reqwest::blocking::Client,
    retry: RetryPolicy,
}

impl HttpPageFetcher {
    /// Create a fetcher with the default timeout
    pub fn new() -> Result<Self, WebError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a fetcher with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, WebError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WebError::NotConfigured(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            retry: RetryPolicy::default(),
        })
    }

    /// Set the attempts per page (at least 1)
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

    fn attempt(&self, url: &str) -> Result<String, WebError> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(WebError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(true, |ct| ct.contains("html"));

        let body = response.text()?;
        Ok(if is_html { html_to_text(&body) } else { body.trim().to_string() })
    }
}

impl PageFetcher for HttpPageFetcher {
    type Error = WebError;

    fn fetch_text(&self, url: &str) -> Result<String, Self::Error> {
        debug!("fetching {}", url);
        let text = self.retry.run(url, || self.attempt(url))?;

        if text.is_empty() {
            return Err(WebError::EmptyPage(url.to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_strips_chrome_and_tags() {
        let html = r#"<html><head><style>p { color: red; }</style></head>
<body><nav>Home | Login</nav>
<h1>Budget&nbsp;2025</h1>
<p>The Union Budget allocates <b>&#8377;500 crore</b> to the scheme.</p>
<script>var x = 1;</script>
<p>Second paragraph &amp; more.</p>
<footer>Copyright</footer></body></html>"#;

        let text = html_to_text(html);
        assert!(text.contains("Budget 2025"));
        assert!(text.contains("The Union Budget allocates ₹500 crore to the scheme."));
        assert!(text.contains("Second paragraph & more."));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("var x"));
        assert!(!text.contains("Login"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_html_to_text_collapses_blank_runs() {
        let text = html_to_text("<p>a</p>\n\n\n\n<p>b</p>");
        assert!(!text.contains("\n\n\n"));
    }

    #[test]
    fn test_retry_builders() {
        let fetcher = HttpPageFetcher::new()
            .unwrap()
            .with_max_retries(3)
            .with_backoff(Duration::from_millis(100));
        assert_eq!(fetcher.retry_policy(), RetryPolicy::new(3, Duration::from_millis(100)));
    }

    #[test]
    fn test_unreachable_page_errors_after_retries() {
        let fetcher = HttpPageFetcher::with_timeout(Duration::from_secs(2))
            .unwrap()
            .with_max_retries(2)
            .with_backoff(Duration::from_millis(1));
        assert!(fetcher.fetch_text("http://127.0.0.1:9/page").is_err());
    }

    #[test]
    fn test_html_to_text_empty() {
        assert_eq!(html_to_text(""), "");
        assert_eq!(html_to_text("<div>   </div>"), "");
    }
}
