//! Gazette Domain Layer
//!
//! Core value types and collaborator traits for the article structuring
//! pipeline. Apart from `uuid` this crate has no external dependencies; every
//! infrastructure concern (HTTP, JSON, configuration) lives in other crates.
//!
//! ## Key Concepts
//!
//! - **RawArticle**: scraped title, URL, body text and optional image bytes
//! - **Candidate**: a tier's proposed structured output, not yet validated
//! - **StructuredRecord**: the final, immutable, renderer-ready record
//! - **Category**: the closed subject taxonomy every record is filed under
//! - **Provenance**: which tier produced a record's base content
//!
//! ## Architecture
//!
//! ```text
//! RawArticle → normalize → tiers (Candidate) → validate → enrich → classify → assemble → StructuredRecord
//! ```
//!
//! The traits in [`traits`] describe the remote collaborators (language
//! models, web search, page fetching). Implementations live in
//! `gazette-llm` and `gazette-web`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod article;
pub mod candidate;
pub mod category;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use article::{ImageRef, RawArticle};
pub use candidate::{Candidate, SubSection, INSUFFICIENT_SOURCE};
pub use category::Category;
pub use record::{Provenance, RecordId, StructuredRecord};
