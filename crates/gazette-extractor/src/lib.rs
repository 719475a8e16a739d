//! Gazette Extractor
//!
//! Deterministic text processing for the article pipeline.
//!
//! # Overview
//!
//! Everything in this crate is pure local computation: it never touches the
//! network and never fails on text input. It supplies the pieces the
//! summarization tiers are built from:
//!
//! - **Normalization**: strip boilerplate, menu lines and blank runs
//! - **Segmentation**: split into sentences, fingerprint, deduplicate
//! - **Safe trim**: bound text for remote models without cutting words
//! - **Fact extraction**: rank sentences against a typed pattern table
//! - **Prompting / parsing**: the remote tier's request and its reply
//!
//! # Architecture
//!
//! ```text
//! raw text → TextNormalizer → NormalizedText (cleaned + unique sentences)
//!                                  ├→ FactExtractor → FactSheet
//!                                  └→ safe_trim → PromptBuilder → remote model → parse_candidate
//! ```
//!
//! # Example Usage
//!
//! ```
//! use gazette_extractor::{ExtractorConfig, FactExtractor, NormalizedText, TextNormalizer};
//!
//! let config = ExtractorConfig::default();
//! let normalizer = TextNormalizer::new(&config);
//! let text = NormalizedText::from_raw(
//!     "Ministry of Agriculture announced Scheme Kisan in 2023 benefiting 10,000 families.",
//!     &normalizer,
//! );
//!
//! let sheet = FactExtractor::new(&config).extract(&text.sentences);
//! assert!(sheet.facts[0].contains("2023"));
//! assert!(sheet.policy_points[0].contains("Ministry of Agriculture"));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod facts;
mod normalize;
mod parser;
mod prompt;
mod sentences;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use facts::{FactExtractor, FactKind, FactSheet, FactStrategy, PATTERN_TABLE_VERSION};
pub use normalize::{NormalizedText, TextNormalizer};
pub use parser::parse_candidate;
pub use prompt::{PromptBuilder, CANDIDATE_SCHEMA};
pub use sentences::{
    dedup_by_fingerprint, fingerprint, safe_trim, segment, truncate_with_ellipsis,
    unique_sentences, word_count, FingerprintSet, FINGERPRINT_CHARS,
};
