//! Deterministic offline tier
//!
//! Builds a candidate from the article's own sentences. Never fails and is
//! trusted by the orchestrator without validation.

use gazette_domain::{Candidate, INSUFFICIENT_SOURCE};
use gazette_extractor::{ExtractorConfig, FactExtractor, FingerprintSet, NormalizedText};
use tracing::debug;

/// Sentences after the lead used as background
const ABOUT_SENTENCES: usize = 2;

/// Candidate producer for the last tier in the chain
#[derive(Debug, Clone)]
pub struct OfflineSummarizer {
    extractor: FactExtractor,
}

impl OfflineSummarizer {
    /// Create an offline summarizer from extractor configuration
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            extractor: FactExtractor::new(config),
        }
    }

    /// Summarize an article from its normalized text
    ///
    /// The lead sentence becomes the context, the next sentences not already
    /// used as facts become the background. When extraction finds no facts
    /// the title stands in as the single fact, or the lead sentence when the
    /// title is blank.
    pub fn summarize(&self, title: &str, url: &str, text: &NormalizedText) -> Candidate {
        let sheet = self.extractor.extract(&text.sentences);

        let mut facts = sheet.facts;
        if facts.is_empty() {
            let stand_in = Some(title.trim())
                .filter(|t| !t.is_empty())
                .or_else(|| text.sentences.first().map(String::as_str));
            facts.extend(stand_in.map(str::to_string));
        }

        let context = text
            .sentences
            .first()
            .cloned()
            .unwrap_or_else(|| INSUFFICIENT_SOURCE.to_string());

        let mut used = FingerprintSet::new();
        used.insert(&context);
        for fact in &facts {
            used.insert(fact);
        }
        let about = text
            .sentences
            .iter()
            .skip(1)
            .filter(|s| !used.contains(s))
            .take(ABOUT_SENTENCES)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");

        debug!(
            facts = facts.len(),
            policy_points = sheet.policy_points.len(),
            strategy = ?sheet.strategy,
            "Offline candidate built"
        );

        Candidate {
            include: true,
            category: None,
            heading: title.trim().to_string(),
            context,
            about,
            facts,
            policy_points: sheet.policy_points,
            source_url: Some(url.to_string()),
            ..Candidate::default()
        }
    }
}

impl Default for OfflineSummarizer {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}
