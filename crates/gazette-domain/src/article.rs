//! Scraped article input

use std::fmt;
use std::sync::Arc;

/// Raw image bytes attached to an article
///
/// Cheap to clone; the bytes are shared between the article and every record
/// assembled from it.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageRef(Arc<[u8]>);

impl ImageRef {
    /// Wrap raw image bytes
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Borrow the raw bytes
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Size of the image in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the image carries no bytes at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageRef({} bytes)", self.0.len())
    }
}

/// An article as supplied by the scrape collaborator
///
/// Immutable once received. The pipeline never writes back into it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArticle {
    /// Headline as published
    pub title: String,

    /// Canonical article URL (also used for source-level dedup)
    pub url: String,

    /// Extracted body text, possibly still containing boilerplate
    pub raw_text: String,

    /// Lead image, when the scraper found one
    pub image: Option<ImageRef>,
}

impl RawArticle {
    /// Create an article without an image
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            raw_text: raw_text.into(),
            image: None,
        }
    }

    /// Attach image bytes
    pub fn with_image(mut self, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.image = Some(ImageRef::new(bytes));
        self
    }

    /// Number of whitespace-separated words in the raw body
    pub fn word_count(&self) -> usize {
        self.raw_text.split_whitespace().count()
    }
}
