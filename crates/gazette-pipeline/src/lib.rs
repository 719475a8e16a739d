//! Gazette Pipeline
//!
//! Turns scraped news articles into structured, categorized records.
//!
//! # Overview
//!
//! Each article passes through:
//!
//! 1. **Normalization**: boilerplate removal and sentence dedup
//! 2. **Orchestration**: remote tiers in order, each candidate validated,
//!    with the deterministic offline tier as the guaranteed last resort
//! 3. **Enrichment** (optional): web search for missing facts and policy points
//! 4. **Classification**: model label if it maps onto the taxonomy, else
//!    weighted keyword scoring with a fixed tie-break
//! 5. **Assembly**: caps, cross-field dedup, bounded brief, guaranteed content
//!
//! The [`BatchRunner`] drives a day's articles through the pipeline with
//! URL dedup, caps, a polite delay and a headline fallback.
//!
//! # Example Usage
//!
//! ```
//! use gazette_domain::RawArticle;
//! use gazette_llm::MockProvider;
//! use gazette_pipeline::{ArticleOutcome, Orchestrator, Pipeline, PipelineConfig};
//! use gazette_web::{MockFetcher, MockSearcher};
//!
//! # tokio_test::block_on(async {
//! let config = PipelineConfig::default();
//! let orchestrator = Orchestrator::<MockProvider>::new(&config);
//! let pipeline: Pipeline<MockProvider, MockSearcher, MockFetcher> =
//!     Pipeline::new(orchestrator, config);
//!
//! let article = RawArticle::new(
//!     "Scheme Kisan launched",
//!     "https://news.example/kisan",
//!     "Ministry of Agriculture announced Scheme Kisan in 2023 benefiting 10,000 families.",
//! );
//!
//! let outcome = pipeline.process(&article).await;
//! let record = outcome.record().unwrap();
//! assert!(record.facts[0].contains("10,000"));
//! # });
//! ```

#![warn(missing_docs)]

mod assembler;
mod batch;
mod classifier;
mod config;
mod enrichment;
mod metrics;
mod offline;
mod orchestrator;
mod pipeline;
mod tier;

pub use assembler::{RecordAssembler, HEADLINE_CONTEXT};
pub use batch::{group_by_category, BatchReport, BatchRunner};
pub use classifier::{keyword_weight, CategoryClassifier};
pub use config::{ConfigError, EnrichmentConfig, LimitsConfig, PipelineConfig, TierConfig};
pub use enrichment::{merge, EnrichedPage, Enricher, Enrichment, MergeReport};
pub use metrics::RunMetrics;
pub use offline::OfflineSummarizer;
pub use orchestrator::{Orchestrator, Summary};
pub use pipeline::{ArticleOutcome, Pipeline, ProcessedRecord, SkipReason};
pub use tier::{AttemptOutcome, Tier, TierAttempt, TierFailure};
