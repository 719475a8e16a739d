//! Batch runner
//!
//! Processes a day's scraped articles sequentially: URL-level dedup, a cap
//! on articles considered and on records emitted, a fixed pause between
//! articles, and a headline-only fallback when nothing else came out.

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use gazette_domain::traits::{LlmProvider, PageFetcher, WebSearcher};
use gazette_domain::{Category, RawArticle, StructuredRecord};
use tracing::{info, warn};

use crate::metrics::RunMetrics;
use crate::pipeline::{ArticleOutcome, Pipeline};

/// Records produced by a run, with its metrics
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Records in processing order
    pub records: Vec<StructuredRecord>,

    /// What happened during the run
    pub metrics: RunMetrics,
}

/// Sequential runner over a batch of articles
pub struct BatchRunner<L, S, F> {
    pipeline: Pipeline<L, S, F>,
}

impl<L, S, F> BatchRunner<L, S, F>
where
    L: LlmProvider + Send + Sync + 'static,
    S: WebSearcher + Send + Sync + 'static,
    F: PageFetcher + Send + Sync + 'static,
    L::Error: fmt::Display,
    S::Error: fmt::Display,
    F::Error: fmt::Display,
{
    /// Create a runner around a pipeline
    pub fn new(pipeline: Pipeline<L, S, F>) -> Self {
        Self { pipeline }
    }

    /// The wrapped pipeline
    pub fn pipeline(&self) -> &Pipeline<L, S, F> {
        &self.pipeline
    }

    /// Run the batch
    pub async fn run(&self, articles: Vec<RawArticle>) -> BatchReport {
        let start = Instant::now();
        let limits = &self.pipeline.config().limits;
        let mut metrics = RunMetrics::new();
        metrics.articles_seen = articles.len();

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for article in articles {
            if candidates.len() >= limits.max_candidates {
                break;
            }
            if !seen.insert(article.url.clone()) {
                metrics.duplicates_skipped += 1;
                continue;
            }
            candidates.push(article);
        }

        info!(
            candidates = candidates.len(),
            duplicates = metrics.duplicates_skipped,
            "Starting batch"
        );

        let mut records = Vec::new();
        for (index, article) in candidates.iter().enumerate() {
            if records.len() >= limits.max_inclusions {
                info!(cap = limits.max_inclusions, "Inclusion cap reached");
                break;
            }

            info!(title = %article.title, "Processing article");
            let outcome = self.pipeline.process(article).await;
            let contacted_remote = !matches!(outcome, ArticleOutcome::Skipped(_));

            match outcome {
                ArticleOutcome::Emitted(processed) => {
                    let escalations = processed.attempts.iter().filter(|a| a.escalated()).count();
                    metrics.record_emitted(processed.record.provenance, escalations);
                    if let Some(report) = &processed.enrichment {
                        metrics.record_enrichment(report.facts_added);
                    }
                    records.push(processed.record);
                }
                ArticleOutcome::Excluded { attempts } => {
                    let escalations = attempts.iter().filter(|a| a.escalated()).count();
                    metrics.record_excluded(escalations);
                }
                ArticleOutcome::Skipped(_) => metrics.record_unavailable(),
            }

            let more_to_do = index + 1 < candidates.len() && records.len() < limits.max_inclusions;
            if contacted_remote && more_to_do && limits.delay_ms > 0 {
                tokio::time::sleep(limits.delay()).await;
            }
        }

        if records.is_empty() && limits.headline_fallback {
            warn!("No records emitted; falling back to headlines");
            for article in candidates.iter().take(limits.headline_fallback_count) {
                records.push(self.pipeline.assembler().headline(article));
                metrics.headline_fallbacks += 1;
            }
        }

        metrics.total_runtime_ms = start.elapsed().as_millis() as u64;
        info!(records = records.len(), "Batch complete");

        BatchReport { records, metrics }
    }
}

/// Bucket records by category in display order, skipping empty categories
pub fn group_by_category(records: &[StructuredRecord]) -> Vec<(Category, Vec<&StructuredRecord>)> {
    Category::DISPLAY_ORDER
        .iter()
        .map(|category| {
            let members: Vec<&StructuredRecord> =
                records.iter().filter(|r| r.category == *category).collect();
            (*category, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}
