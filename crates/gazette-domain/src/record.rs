//! Structured record - the pipeline's final output

use crate::{Category, ImageRef, SubSection};
use std::fmt;

/// Unique identifier for an assembled record, based on UUIDv7
///
/// Records are sortable by creation time through their identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use gazette_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from its hyphenated string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid record id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Which tier produced a record's base content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provenance {
    /// First remote model in the chain
    PrimaryRemote,

    /// Backup remote model
    SecondaryRemote,

    /// Local pattern-based extraction (never fails)
    Deterministic,

    /// Headline-only placeholder emitted when a run produced nothing else
    HeadlineFallback,
}

impl Provenance {
    /// Stable tag used in logs and rendered output
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::PrimaryRemote => "primary",
            Provenance::SecondaryRemote => "secondary",
            Provenance::Deterministic => "deterministic",
            Provenance::HeadlineFallback => "headline",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final, validated, deduplicated record handed to the renderer
///
/// Immutable once assembled. Every list-typed field is always present
/// (possibly empty) and `category` is always a taxonomy value.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRecord {
    /// Unique identifier
    pub id: RecordId,

    /// Always true for emitted records; excluded articles never become records
    pub include: bool,

    /// Subject bucket
    pub category: Category,

    /// Section heading
    pub heading: String,

    /// Why the article is in the news
    pub context: String,

    /// Background narrative, free of sentences already in `context`
    pub about: String,

    /// Fingerprint-unique factual bullets
    pub facts: Vec<String>,

    /// Fingerprint-unique governance and policy bullets
    pub policy_points: Vec<String>,

    /// Additional titled groups of points
    pub sub_sections: Vec<SubSection>,

    /// Narrative brief inside the configured word window
    pub detailed_brief: String,

    /// Impact or significance bullets
    pub impact_points: Vec<String>,

    /// Exam relevance label derived from the category
    pub relevance_label: String,

    /// Source article URL
    pub source_url: String,

    /// Lead image carried over from the source article
    pub image_ref: Option<ImageRef>,

    /// Tier that produced the base content
    pub provenance: Provenance,

    /// Pages whose facts were merged in by web enrichment
    pub enrichment_sources: Vec<String>,
}

impl StructuredRecord {
    /// Number of words in the detailed brief
    pub fn brief_word_count(&self) -> usize {
        self.detailed_brief.split_whitespace().count()
    }

    /// Whether every narrative field is blank
    pub fn narrative_is_empty(&self) -> bool {
        self.context.trim().is_empty()
            && self.about.trim().is_empty()
            && self.detailed_brief.trim().is_empty()
    }
}
