//! Per-article pipeline
//!
//! Normalize → orchestrate tiers → enrich (when triggered) → classify →
//! assemble. Processing an article never returns an error: every failure
//! either escalates inside the orchestrator or ends as a skip.

use std::fmt;

use gazette_domain::traits::{LlmProvider, PageFetcher, WebSearcher};
use gazette_domain::{RawArticle, StructuredRecord};
use gazette_extractor::{word_count, NormalizedText, TextNormalizer};
use tracing::{debug, info};

use crate::assembler::RecordAssembler;
use crate::classifier::CategoryClassifier;
use crate::config::PipelineConfig;
use crate::enrichment::{merge, Enricher, MergeReport};
use crate::orchestrator::Orchestrator;
use crate::tier::TierAttempt;

/// Why an article was skipped before summarization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The scrape supplied no text
    EmptySource,

    /// Too little text survived normalization
    TooShort {
        /// Words after normalization
        words: usize,
        /// Minimum required
        required: usize,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptySource => write!(f, "no source text"),
            SkipReason::TooShort { words, required } => {
                write!(f, "{} words of usable text, {} required", words, required)
            }
        }
    }
}

/// A record and the diagnostics of how it was produced
#[derive(Debug, Clone)]
pub struct ProcessedRecord {
    /// The emitted record
    pub record: StructuredRecord,

    /// Every tier asked, in order
    pub attempts: Vec<TierAttempt>,

    /// What enrichment added, when it ran
    pub enrichment: Option<MergeReport>,
}

/// Result of processing one article
#[derive(Debug, Clone)]
pub enum ArticleOutcome {
    /// A record was produced
    Emitted(Box<ProcessedRecord>),

    /// The accepted tier marked the article as not relevant
    Excluded {
        /// Every tier asked, in order
        attempts: Vec<TierAttempt>,
    },

    /// The article had no usable source text
    Skipped(SkipReason),
}

impl ArticleOutcome {
    /// The emitted record, if any
    pub fn record(&self) -> Option<&StructuredRecord> {
        match self {
            ArticleOutcome::Emitted(processed) => Some(&processed.record),
            _ => None,
        }
    }

    /// Consume the outcome, returning the emitted record
    pub fn into_record(self) -> Option<StructuredRecord> {
        match self {
            ArticleOutcome::Emitted(processed) => Some(processed.record),
            _ => None,
        }
    }
}

/// The article structuring pipeline
pub struct Pipeline<L, S, F> {
    normalizer: TextNormalizer,
    orchestrator: Orchestrator<L>,
    enricher: Option<Enricher<S, F>>,
    classifier: CategoryClassifier,
    assembler: RecordAssembler,
    config: PipelineConfig,
}

impl<L, S, F> Pipeline<L, S, F>
where
    L: LlmProvider + Send + Sync + 'static,
    S: WebSearcher + Send + Sync + 'static,
    F: PageFetcher + Send + Sync + 'static,
    L::Error: fmt::Display,
    S::Error: fmt::Display,
    F::Error: fmt::Display,
{
    /// Create a pipeline without enrichment
    pub fn new(orchestrator: Orchestrator<L>, config: PipelineConfig) -> Self {
        Self {
            normalizer: TextNormalizer::new(&config.extractor),
            orchestrator,
            enricher: None,
            classifier: CategoryClassifier::new(),
            assembler: RecordAssembler::new(config.limits.clone()),
            config,
        }
    }

    /// Attach a web enricher; it only runs when enrichment is enabled
    pub fn with_enricher(mut self, enricher: Enricher<S, F>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// The configuration this pipeline was built with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The record assembler
    pub fn assembler(&self) -> &RecordAssembler {
        &self.assembler
    }

    /// Process one article
    pub async fn process(&self, article: &RawArticle) -> ArticleOutcome {
        if article.raw_text.trim().is_empty() {
            info!(url = %article.url, "Skipping article: no source text");
            return ArticleOutcome::Skipped(SkipReason::EmptySource);
        }

        let text = NormalizedText::from_raw(&article.raw_text, &self.normalizer);
        let words = word_count(&text.cleaned);
        let required = self.config.limits.min_source_words;
        if words < required {
            info!(url = %article.url, words, required, "Skipping article: too little text");
            return ArticleOutcome::Skipped(SkipReason::TooShort { words, required });
        }

        debug!(
            url = %article.url,
            sentences = text.sentences.len(),
            "Normalized article"
        );

        let summary = self
            .orchestrator
            .summarize(&article.title, &article.url, &text)
            .await;

        if !summary.candidate.include {
            info!(url = %article.url, tier = %summary.provenance, "Article excluded as not relevant");
            return ArticleOutcome::Excluded {
                attempts: summary.attempts,
            };
        }

        let mut candidate = summary.candidate;
        let mut enrichment = None;
        if let Some(enricher) = self.enricher.as_ref().filter(|_| self.config.enrichment.enabled) {
            if enricher.should_enrich(&article.title, &candidate) {
                let found = enricher.gather(&article.title).await;
                enrichment = Some(merge(&mut candidate, found, &self.config.limits));
            }
        }

        let category = self.classifier.classify(
            candidate.category.as_deref(),
            &article.title,
            &text.cleaned,
        );

        let sources = enrichment
            .as_ref()
            .map(|report| report.sources.clone())
            .unwrap_or_default();
        let record = self
            .assembler
            .assemble(candidate, category, summary.provenance, article, sources);

        info!(
            url = %article.url,
            tier = %record.provenance,
            category = %record.category.as_str(),
            facts = record.facts.len(),
            "Record assembled"
        );

        ArticleOutcome::Emitted(Box::new(ProcessedRecord {
            record,
            attempts: summary.attempts,
            enrichment,
        }))
    }
}
