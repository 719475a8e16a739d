//! Metrics collection for pipeline runs

use gazette_domain::Provenance;
use std::collections::HashMap;

/// Metrics collected during one batch run
///
/// Tracks what happened to every article offered to the run and which tier
/// produced each emitted record.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Articles offered to the run
    pub articles_seen: usize,

    /// Articles dropped because their URL was already seen
    pub duplicates_skipped: usize,

    /// Articles skipped for missing or too-short text
    pub sources_unavailable: usize,

    /// Articles a tier marked as not relevant
    pub excluded: usize,

    /// Records emitted from processed articles
    pub emitted: usize,

    /// Accepted candidates per tier
    pub accepted: HashMap<Provenance, usize>,

    /// Tier attempts that failed and escalated
    pub escalations: usize,

    /// Enrichment passes run
    pub enrichment_runs: usize,

    /// Facts added by enrichment
    pub facts_enriched: usize,

    /// Headline-only records added by the fallback
    pub headline_fallbacks: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,
}

impl RunMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a source-level skip
    pub fn record_unavailable(&mut self) {
        self.sources_unavailable += 1;
    }

    /// Record an excluded article
    pub fn record_excluded(&mut self, escalations: usize) {
        self.excluded += 1;
        self.escalations += escalations;
    }

    /// Record an emitted record
    pub fn record_emitted(&mut self, provenance: Provenance, escalations: usize) {
        self.emitted += 1;
        self.escalations += escalations;
        *self.accepted.entry(provenance).or_insert(0) += 1;
    }

    /// Record an enrichment pass and the facts it added
    pub fn record_enrichment(&mut self, facts_added: usize) {
        self.enrichment_runs += 1;
        self.facts_enriched += facts_added;
    }

    /// Get total records in the run, headline fallbacks included
    pub fn total_records(&self) -> usize {
        self.emitted + self.headline_fallbacks
    }

    /// Get accepted candidates for one tier
    pub fn accepted_by(&self, provenance: Provenance) -> usize {
        self.accepted.get(&provenance).copied().unwrap_or(0)
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Run Metrics Summary".to_string(),
            "===================".to_string(),
            format!("Articles seen: {}", self.articles_seen),
            format!("Duplicate URLs skipped: {}", self.duplicates_skipped),
            format!("Sources unavailable: {}", self.sources_unavailable),
            format!("Excluded as not relevant: {}", self.excluded),
            format!("Records emitted: {}", self.emitted),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            String::new(),
        ];

        if !self.accepted.is_empty() {
            lines.push("Accepted by tier:".to_string());
            let mut tiers: Vec<_> = self.accepted.iter().collect();
            tiers.sort();
            for (tier, count) in tiers {
                lines.push(format!("  {}: {}", tier, count));
            }
            lines.push(format!("  Escalations: {}", self.escalations));
            lines.push(String::new());
        }

        if self.enrichment_runs > 0 {
            lines.push(format!(
                "Enrichment: {} passes, {} facts added",
                self.enrichment_runs, self.facts_enriched
            ));
        }

        if self.headline_fallbacks > 0 {
            lines.push(format!("Headline fallbacks: {}", self.headline_fallbacks));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics() {
        let metrics = RunMetrics::new();
        assert_eq!(metrics.total_records(), 0);
        assert_eq!(metrics.accepted_by(Provenance::PrimaryRemote), 0);
    }

    #[test]
    fn test_record_emitted() {
        let mut metrics = RunMetrics::new();
        metrics.record_emitted(Provenance::PrimaryRemote, 0);
        metrics.record_emitted(Provenance::Deterministic, 2);
        metrics.record_emitted(Provenance::Deterministic, 1);

        assert_eq!(metrics.emitted, 3);
        assert_eq!(metrics.escalations, 3);
        assert_eq!(metrics.accepted_by(Provenance::Deterministic), 2);
    }

    #[test]
    fn test_record_enrichment() {
        let mut metrics = RunMetrics::new();
        metrics.record_enrichment(3);
        metrics.record_enrichment(0);
        assert_eq!(metrics.enrichment_runs, 2);
        assert_eq!(metrics.facts_enriched, 3);
    }

    #[test]
    fn test_summary() {
        let mut metrics = RunMetrics::new();
        metrics.articles_seen = 4;
        metrics.record_emitted(Provenance::SecondaryRemote, 1);
        metrics.record_excluded(0);
        metrics.record_unavailable();
        metrics.headline_fallbacks = 0;

        let summary = metrics.summary();
        assert!(summary.contains("Articles seen: 4"));
        assert!(summary.contains("secondary: 1"));
        assert!(summary.contains("Escalations: 1"));
        assert!(summary.contains("Excluded as not relevant: 1"));
        assert!(!summary.contains("Headline fallbacks"));
    }
}
