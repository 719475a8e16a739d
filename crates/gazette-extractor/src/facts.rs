//! Pattern-based fact and policy extraction
//!
//! Sentences are scored against a fixed table of typed patterns. The table is
//! versioned so records produced by different tables can be told apart.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::ExtractorConfig;
use crate::sentences::{truncate_with_ellipsis, FingerprintSet};

/// Version of the fact pattern table
pub const PATTERN_TABLE_VERSION: u32 = 1;

/// Kind of factual signal a pattern detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactKind {
    /// Four-digit year
    Year,
    /// Percentage or "per cent" figure
    Percentage,
    /// Grouped number or lakh/crore/million style quantity
    LargeNumber,
    /// Amount with a currency marker
    Currency,
    /// Named public institution
    Institution,
    /// Named scheme, mission, act or programme
    Scheme,
}

static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static RE_PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d+(?:\.\d+)?\s?(?:%|per\s?cent\b|percent\b)").unwrap());

static RE_LARGE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d{1,3}(?:,\d{2,3})+(?:\.\d+)?\b|\b\d+(?:\.\d+)?\s?(?:lakh|crore|million|billion|trillion)\b",
    )
    .unwrap()
});

static RE_CURRENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[₹$€£]\s?\d|(?i:\b(?:rs\.?|inr|usd)\s?\d)").unwrap());

static RE_INSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Ministry|Department|Commission|Supreme Court|High Court|Parliament|Lok Sabha|Rajya Sabha|Cabinet|Reserve Bank|RBI|SEBI|NITI Aayog|ISRO|DRDO|Authority|Council|Tribunal|United Nations|WHO|IMF|World Bank|Government)\b",
    )
    .unwrap()
});

static RE_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Scheme|Yojana|Mission|Act|Bill|Policy|Programme|Program|Abhiyan|Initiative)\b")
        .unwrap()
});

/// Governance vocabulary that marks a sentence as a policy point
static RE_GOVERNANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:ministry|ministries|department|scheme|schemes|act|bill|programme|program|yojana|policy|mission)\b",
    )
    .unwrap()
});

static RE_NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap());

struct FactPattern {
    kind: FactKind,
    regex: &'static LazyLock<Regex>,
}

static FACT_PATTERNS: &[FactPattern] = &[
    FactPattern { kind: FactKind::Year, regex: &RE_YEAR },
    FactPattern { kind: FactKind::Percentage, regex: &RE_PERCENTAGE },
    FactPattern { kind: FactKind::LargeNumber, regex: &RE_LARGE_NUMBER },
    FactPattern { kind: FactKind::Currency, regex: &RE_CURRENCY },
    FactPattern { kind: FactKind::Institution, regex: &RE_INSTITUTION },
    FactPattern { kind: FactKind::Scheme, regex: &RE_SCHEME },
];

/// How a [`FactSheet`]'s facts were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactStrategy {
    /// Sentences ranked by pattern matches
    Scored,
    /// No sentence matched; bare numeric tokens as "Figure: N"
    Figures,
    /// No numbers either; sentences following the lead
    LeadingSentences,
    /// Nothing usable
    Empty,
}

/// Facts and policy points extracted from one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactSheet {
    /// Fact bullets, best first
    pub facts: Vec<String>,
    /// Governance sentences in document order
    pub policy_points: Vec<String>,
    /// Which extraction path produced the facts
    pub strategy: FactStrategy,
}

/// Selects fact and policy sentences using the pattern table
#[derive(Debug, Clone)]
pub struct FactExtractor {
    max_facts: usize,
    max_policy_points: usize,
    max_fact_chars: usize,
}

impl FactExtractor {
    /// Create an extractor from configuration
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            max_facts: config.max_extracted_facts,
            max_policy_points: config.max_policy_points,
            max_fact_chars: config.max_fact_chars,
        }
    }

    /// Kinds of fact pattern a sentence matches, one entry per match
    pub fn matches(sentence: &str) -> Vec<FactKind> {
        FACT_PATTERNS
            .iter()
            .flat_map(|pattern| {
                let hits = pattern.regex.find_iter(sentence).count();
                std::iter::repeat_n(pattern.kind, hits)
            })
            .collect()
    }

    /// Total number of pattern matches in a sentence
    pub fn score(sentence: &str) -> usize {
        FACT_PATTERNS
            .iter()
            .map(|pattern| pattern.regex.find_iter(sentence).count())
            .sum()
    }

    /// Whether a sentence mentions a ministry, scheme, act or similar
    pub fn is_policy_sentence(sentence: &str) -> bool {
        RE_GOVERNANCE.is_match(sentence)
    }

    /// Extract facts and policy points from unique sentences.
    ///
    /// Facts come from the highest-scoring sentences (ties keep document
    /// order). Without any match the extractor falls back to numeric tokens,
    /// then to the sentences after the lead when there are at least two.
    pub fn extract(&self, sentences: &[String]) -> FactSheet {
        let (facts, strategy) = self.select_facts(sentences);
        let policy_points = self.select_policy(sentences);

        debug!(
            facts = facts.len(),
            policy_points = policy_points.len(),
            strategy = ?strategy,
            "Extracted fact sheet"
        );

        FactSheet {
            facts,
            policy_points,
            strategy,
        }
    }

    fn select_facts(&self, sentences: &[String]) -> (Vec<String>, FactStrategy) {
        let mut scored: Vec<(usize, &String)> = sentences
            .iter()
            .map(|s| (Self::score(s), s))
            .filter(|(score, _)| *score > 0)
            .collect();

        if !scored.is_empty() {
            // stable sort keeps document order among equal scores
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            let facts = self.bounded(scored.into_iter().map(|(_, s)| s.as_str()), self.max_facts);
            return (facts, FactStrategy::Scored);
        }

        let figures = self.figures(sentences);
        if !figures.is_empty() {
            return (figures, FactStrategy::Figures);
        }

        if sentences.len() >= 2 {
            let facts = self.bounded(sentences[1..].iter().map(String::as_str), self.max_facts);
            if !facts.is_empty() {
                return (facts, FactStrategy::LeadingSentences);
            }
        }

        (Vec::new(), FactStrategy::Empty)
    }

    fn figures(&self, sentences: &[String]) -> Vec<String> {
        let mut seen = FingerprintSet::new();
        sentences
            .iter()
            .flat_map(|s| RE_NUMERIC_TOKEN.find_iter(s))
            .map(|m| m.as_str().trim_end_matches(','))
            .filter(|token| !token.is_empty())
            .map(|token| format!("Figure: {}", token))
            .filter(|figure| seen.insert(figure))
            .take(self.max_facts)
            .collect()
    }

    fn select_policy(&self, sentences: &[String]) -> Vec<String> {
        self.bounded(
            sentences
                .iter()
                .map(String::as_str)
                .filter(|s| Self::is_policy_sentence(s)),
            self.max_policy_points,
        )
    }

    fn bounded<'a>(&self, items: impl Iterator<Item = &'a str>, limit: usize) -> Vec<String> {
        let mut seen = FingerprintSet::new();
        items
            .filter(|s| seen.insert(s))
            .map(|s| truncate_with_ellipsis(s, self.max_fact_chars))
            .take(limit)
            .collect()
    }
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pattern_kinds() {
        let kinds = FactExtractor::matches(
            "The Ministry of Finance allotted ₹500 crore in 2024 under the Jal Jeevan Mission, up 12%.",
        );
        assert!(kinds.contains(&FactKind::Institution));
        assert!(kinds.contains(&FactKind::Currency));
        assert!(kinds.contains(&FactKind::LargeNumber));
        assert!(kinds.contains(&FactKind::Year));
        assert!(kinds.contains(&FactKind::Scheme));
        assert!(kinds.contains(&FactKind::Percentage));
    }

    #[test]
    fn test_per_cent_and_grouped_numbers() {
        assert_eq!(FactExtractor::matches("Inflation eased to 4.5 per cent"), vec![FactKind::Percentage]);
        assert_eq!(FactExtractor::matches("Around 10,000 farmers joined"), vec![FactKind::LargeNumber]);
        assert!(FactExtractor::matches("Rs. 40 was charged").contains(&FactKind::Currency));
    }

    #[test]
    fn test_plain_sentence_scores_zero() {
        assert_eq!(FactExtractor::score("The weather was pleasant all week long."), 0);
    }

    #[test]
    fn test_ranking_prefers_more_matches_and_keeps_order_on_ties() {
        let extractor = FactExtractor::default();
        let input = sentences(&[
            "Officials met in 2021.",
            "Nothing measurable happened here.",
            "In 2022 the Cabinet cleared 12% more funds.",
            "Talks resumed in 2023.",
        ]);

        let sheet = extractor.extract(&input);

        assert_eq!(sheet.strategy, FactStrategy::Scored);
        assert_eq!(sheet.facts[0], "In 2022 the Cabinet cleared 12% more funds.");
        assert_eq!(sheet.facts[1], "Officials met in 2021.");
        assert_eq!(sheet.facts[2], "Talks resumed in 2023.");
        assert_eq!(sheet.facts.len(), 3);
    }

    #[test]
    fn test_fact_cap() {
        let extractor = FactExtractor::default();
        let input: Vec<String> = (0..10).map(|i| format!("Event number {} in 2001.", i)).collect();
        assert_eq!(extractor.extract(&input).facts.len(), 6);
    }

    #[test]
    fn test_long_fact_is_cut_with_ellipsis() {
        let extractor = FactExtractor::default();
        let long = format!("In 2020 {}", "the panel examined records ".repeat(20));
        let sheet = extractor.extract(&[long]);
        assert!(sheet.facts[0].ends_with('…'));
        assert!(sheet.facts[0].chars().count() <= 240);
    }

    #[test]
    fn test_policy_points_and_facts_may_share_a_sentence() {
        let extractor = FactExtractor::default();
        let input = sentences(&[
            "Ministry of Agriculture announced Scheme Kisan in 2023 benefiting 10,000 families.",
        ]);

        let sheet = extractor.extract(&input);

        assert_eq!(sheet.facts, input);
        assert_eq!(sheet.policy_points, input);
    }

    #[test]
    fn test_policy_cap_and_order() {
        let extractor = FactExtractor::default();
        let input: Vec<String> = (0..8).map(|i| format!("The policy changed step {}.", i)).collect();
        let sheet = extractor.extract(&input);
        assert_eq!(sheet.policy_points.len(), 5);
        assert_eq!(sheet.policy_points[0], "The policy changed step 0.");
    }

    #[test]
    fn test_figure_fallback() {
        let extractor = FactExtractor::default();
        let input = sentences(&["Only 42 people came.", "Later 7 more arrived, then 42 again."]);

        let sheet = extractor.extract(&input);

        assert_eq!(sheet.strategy, FactStrategy::Figures);
        assert_eq!(sheet.facts, vec!["Figure: 42", "Figure: 7"]);
    }

    #[test]
    fn test_leading_sentence_fallback() {
        let extractor = FactExtractor::default();
        let input = sentences(&["A quiet lead.", "A second line.", "A third line."]);

        let sheet = extractor.extract(&input);

        assert_eq!(sheet.strategy, FactStrategy::LeadingSentences);
        assert_eq!(sheet.facts, vec!["A second line.", "A third line."]);
    }

    #[test]
    fn test_single_plain_sentence_yields_nothing() {
        let extractor = FactExtractor::default();
        let sheet = extractor.extract(&sentences(&["Just one quiet sentence."]));
        assert_eq!(sheet.strategy, FactStrategy::Empty);
        assert!(sheet.facts.is_empty());
        assert!(sheet.policy_points.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let sheet = FactExtractor::default().extract(&[]);
        assert_eq!(sheet.strategy, FactStrategy::Empty);
    }
}
