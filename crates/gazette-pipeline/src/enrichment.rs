//! Web enrichment connector
//!
//! Searches the web for an article's title, runs each result page through
//! the same normalize → segment → extract path as the article itself, and
//! merges facts and policy points the record does not already hold.
//! Every failure along the way is logged and skipped.

use std::sync::{Arc, LazyLock};

use gazette_domain::traits::{PageFetcher, WebSearcher};
use gazette_domain::Candidate;
use gazette_extractor::{safe_trim, FactExtractor, FingerprintSet, NormalizedText, TextNormalizer};
use regex::Regex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::{EnrichmentConfig, LimitsConfig, PipelineConfig};

static RE_SCHEME_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:scheme|yojana|mission|programme|abhiyan|policy|act|bill)\b").unwrap()
});

/// Facts and policy points found on one result page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichedPage {
    /// Page URL
    pub link: String,
    /// Facts extracted from the page
    pub facts: Vec<String>,
    /// Policy points extracted from the page
    pub policy_points: Vec<String>,
}

/// Everything one enrichment pass gathered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// Pages that yielded something, in search order
    pub pages: Vec<EnrichedPage>,
}

/// What a merge added to a candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Facts appended
    pub facts_added: usize,
    /// Policy points appended
    pub policy_added: usize,
    /// Pages that contributed at least one item
    pub sources: Vec<String>,
}

/// Best-effort web enrichment for fact-starved records
pub struct Enricher<S, F> {
    searcher: Arc<S>,
    fetcher: Arc<F>,
    normalizer: TextNormalizer,
    extractor: FactExtractor,
    config: EnrichmentConfig,
}

impl<S, F> Enricher<S, F>
where
    S: WebSearcher + Send + Sync + 'static,
    F: PageFetcher + Send + Sync + 'static,
    S::Error: std::fmt::Display,
    F::Error: std::fmt::Display,
{
    /// Create an enricher from its collaborators
    pub fn new(searcher: S, fetcher: F, config: &PipelineConfig) -> Self {
        Self {
            searcher: Arc::new(searcher),
            fetcher: Arc::new(fetcher),
            normalizer: TextNormalizer::new(&config.extractor),
            extractor: FactExtractor::new(&config.extractor),
            config: config.enrichment.clone(),
        }
    }

    /// Whether a candidate should be enriched
    ///
    /// True when it has fewer distinct facts than the minimum, has no policy
    /// points, or its title names a scheme, act or programme.
    pub fn should_enrich(&self, title: &str, candidate: &Candidate) -> bool {
        let mut distinct = FingerprintSet::new();
        for fact in &candidate.facts {
            distinct.insert(fact);
        }

        distinct.len() < self.config.min_facts
            || candidate.policy_points.is_empty()
            || RE_SCHEME_TITLE.is_match(title)
    }

    /// Search and extract, bounded by the enrichment timeout
    ///
    /// Returns an empty [`Enrichment`] when the pass times out or the search
    /// fails; pages that fail to fetch are skipped.
    pub async fn gather(&self, title: &str) -> Enrichment {
        let query = safe_trim(title.trim(), self.config.query_chars).to_string();
        if query.is_empty() {
            return Enrichment::default();
        }

        let searcher = Arc::clone(&self.searcher);
        let fetcher = Arc::clone(&self.fetcher);
        let normalizer = self.normalizer.clone();
        let extractor = self.extractor.clone();
        let result_count = self.config.result_count;

        let task = tokio::task::spawn_blocking(move || {
            collect_pages(&*searcher, &*fetcher, &normalizer, &extractor, &query, result_count)
        });

        match timeout(self.config.timeout(), task).await {
            Ok(Ok(enrichment)) => enrichment,
            Ok(Err(e)) => {
                warn!("Enrichment task join error: {}", e);
                Enrichment::default()
            }
            Err(_) => {
                warn!("Enrichment timed out after {}s", self.config.timeout_secs);
                Enrichment::default()
            }
        }
    }
}

fn collect_pages<S, F>(
    searcher: &S,
    fetcher: &F,
    normalizer: &TextNormalizer,
    extractor: &FactExtractor,
    query: &str,
    result_count: usize,
) -> Enrichment
where
    S: WebSearcher,
    F: PageFetcher,
    S::Error: std::fmt::Display,
    F::Error: std::fmt::Display,
{
    let hits = match searcher.search(query, result_count) {
        Ok(hits) => hits,
        Err(e) => {
            warn!("Enrichment search failed: {}", e);
            return Enrichment::default();
        }
    };

    let pages = hits
        .into_iter()
        .take(result_count)
        .filter_map(|hit| match fetcher.fetch_text(&hit.link) {
            Ok(body) => {
                let text = NormalizedText::from_raw(&body, normalizer);
                let sheet = extractor.extract(&text.sentences);
                Some(EnrichedPage {
                    link: hit.link,
                    facts: sheet.facts,
                    policy_points: sheet.policy_points,
                })
            }
            Err(e) => {
                debug!(link = %hit.link, "Skipping enrichment page: {}", e);
                None
            }
        })
        .filter(|page| !page.facts.is_empty() || !page.policy_points.is_empty())
        .collect();

    Enrichment { pages }
}

/// Append novel facts and policy points to a candidate, up to the caps
///
/// An item is novel when its fingerprint is not already among the
/// candidate's items of the same kind or its context. The caps count
/// distinct fingerprints, so repeated entries do not use up room.
pub fn merge(candidate: &mut Candidate, enrichment: Enrichment, limits: &LimitsConfig) -> MergeReport {
    let mut fact_seen = FingerprintSet::new();
    let mut policy_seen = FingerprintSet::new();
    for fact in &candidate.facts {
        fact_seen.insert(fact);
    }
    for point in &candidate.policy_points {
        policy_seen.insert(point);
    }
    let mut fact_count = fact_seen.len();
    let mut policy_count = policy_seen.len();

    for sentence in gazette_extractor::segment(&candidate.context) {
        fact_seen.insert(&sentence);
        policy_seen.insert(&sentence);
    }

    let mut report = MergeReport::default();

    for page in enrichment.pages {
        let mut contributed = false;

        for fact in page.facts {
            if fact_count >= limits.max_facts {
                break;
            }
            if fact_seen.insert(&fact) {
                fact_count += 1;
                candidate.facts.push(fact);
                report.facts_added += 1;
                contributed = true;
            }
        }

        for point in page.policy_points {
            if policy_count >= limits.max_policy_points {
                break;
            }
            if policy_seen.insert(&point) {
                policy_count += 1;
                candidate.policy_points.push(point);
                report.policy_added += 1;
                contributed = true;
            }
        }

        if contributed {
            report.sources.push(page.link);
        }
    }

    if report.facts_added + report.policy_added > 0 {
        info!(
            facts_added = report.facts_added,
            policy_added = report.policy_added,
            sources = report.sources.len(),
            "Merged enrichment"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_domain::traits::SearchHit;
    use gazette_web::{MockFetcher, MockSearcher, RetryPolicy, WebError};
    use std::time::Duration;

    const PAGE_ONE: &str = "The scheme covered 2,500 villages in 2022 across four states.\n\
                            The Ministry of Rural Development issued revised guidelines for the scheme.";
    const PAGE_TWO: &str = "The scheme covered 2,500 villages in 2022 across four states.\n\
                            Funding rose by 15% in the latest budget allocation for the programme.";

    fn hits() -> Vec<SearchHit> {
        vec![
            SearchHit::new("One", "https://a.test/1", ""),
            SearchHit::new("Two", "https://a.test/2", ""),
            SearchHit::new("Missing", "https://a.test/404", ""),
        ]
    }

    fn enricher(searcher: MockSearcher, fetcher: MockFetcher) -> Enricher<MockSearcher, MockFetcher> {
        Enricher::new(searcher, fetcher, &PipelineConfig::default())
    }

    fn rich_candidate() -> Candidate {
        Candidate {
            facts: (0..5).map(|i| format!("Distinct fact number {}.", i)).collect(),
            policy_points: vec!["A policy point.".to_string()],
            ..Candidate::default()
        }
    }

    #[test]
    fn test_trigger_on_few_facts() {
        let enricher = enricher(MockSearcher::default(), MockFetcher::new());
        let mut candidate = rich_candidate();
        assert!(!enricher.should_enrich("Monsoon arrives early", &candidate));

        candidate.facts.truncate(3);
        assert!(enricher.should_enrich("Monsoon arrives early", &candidate));
    }

    #[test]
    fn test_trigger_counts_distinct_facts() {
        let enricher = enricher(MockSearcher::default(), MockFetcher::new());
        let candidate = Candidate {
            facts: vec!["Same fact.".to_string(); 6],
            policy_points: vec!["A policy point.".to_string()],
            ..Candidate::default()
        };
        assert!(enricher.should_enrich("Monsoon arrives early", &candidate));
    }

    #[test]
    fn test_trigger_on_missing_policy_or_scheme_title() {
        let enricher = enricher(MockSearcher::default(), MockFetcher::new());
        let mut candidate = rich_candidate();
        assert!(enricher.should_enrich("PM Awas Yojana expands", &candidate));

        candidate.policy_points.clear();
        assert!(enricher.should_enrich("Monsoon arrives early", &candidate));
    }

    #[tokio::test]
    async fn test_gather_skips_failed_pages() {
        let searcher = MockSearcher::new(hits());
        let fetcher = MockFetcher::new()
            .with_page("https://a.test/1", PAGE_ONE)
            .with_page("https://a.test/2", PAGE_TWO);
        let enricher = enricher(searcher.clone(), fetcher.clone());

        let enrichment = enricher.gather("Rural housing scheme").await;

        assert_eq!(searcher.queries(), vec!["Rural housing scheme"]);
        assert_eq!(fetcher.fetched().len(), 3);
        assert_eq!(enrichment.pages.len(), 2);
        assert_eq!(enrichment.pages[0].link, "https://a.test/1");
    }

    #[tokio::test]
    async fn test_gather_survives_search_failure() {
        let enricher = enricher(MockSearcher::failing(), MockFetcher::new());
        let enrichment = enricher.gather("Anything").await;
        assert!(enrichment.pages.is_empty());
    }

    #[tokio::test]
    async fn test_gather_times_out() {
        struct SlowSearcher;

        impl WebSearcher for SlowSearcher {
            type Error = WebError;

            fn search(&self, _query: &str, _count: usize) -> Result<Vec<SearchHit>, Self::Error> {
                std::thread::sleep(Duration::from_millis(300));
                Ok(hits())
            }
        }

        let mut enricher = Enricher::new(SlowSearcher, MockFetcher::new(), &PipelineConfig::default());
        enricher.config.timeout_secs = 0;

        let enrichment = enricher.gather("Anything").await;
        assert!(enrichment.pages.is_empty());
    }

    #[test]
    fn test_merge_adds_only_novel_items() {
        let mut candidate = Candidate {
            context: "The scheme covered 2,500 villages in 2022 across four states.".to_string(),
            facts: vec!["An existing fact about the scheme.".to_string()],
            ..Candidate::default()
        };
        let enrichment = Enrichment {
            pages: vec![
                EnrichedPage {
                    link: "https://a.test/1".to_string(),
                    facts: vec![
                        "The scheme covered 2,500 villages in 2022 across four states.".to_string(),
                        "an existing fact about the scheme".to_string(),
                    ],
                    policy_points: vec!["Guidelines were revised.".to_string()],
                },
                EnrichedPage {
                    link: "https://a.test/2".to_string(),
                    facts: vec!["Funding rose by 15%.".to_string()],
                    policy_points: vec!["guidelines were revised".to_string()],
                },
                EnrichedPage {
                    link: "https://a.test/3".to_string(),
                    facts: vec!["Funding rose by 15%".to_string()],
                    policy_points: vec![],
                },
            ],
        };

        let report = merge(&mut candidate, enrichment, &LimitsConfig::default());

        assert_eq!(report.facts_added, 1);
        assert_eq!(report.policy_added, 1);
        assert_eq!(report.sources, vec!["https://a.test/1", "https://a.test/2"]);
        assert_eq!(
            candidate.facts,
            vec!["An existing fact about the scheme.", "Funding rose by 15%."]
        );
        assert_eq!(candidate.policy_points, vec!["Guidelines were revised."]);
    }

    #[test]
    fn test_merge_caps_count_distinct_items() {
        let limits = LimitsConfig {
            max_facts: 3,
            max_policy_points: 2,
            ..LimitsConfig::default()
        };
        let mut candidate = Candidate {
            facts: vec!["Exports rose by 12% in 2024.".to_string(); 3],
            policy_points: vec!["The Ministry of Commerce notified the rules.".to_string(); 2],
            ..Candidate::default()
        };
        let enrichment = Enrichment {
            pages: vec![EnrichedPage {
                link: "https://a.test/1".to_string(),
                facts: vec!["Imports fell by 3% over the same period.".to_string()],
                policy_points: vec!["A new export promotion scheme was launched.".to_string()],
            }],
        };

        let report = merge(&mut candidate, enrichment, &limits);

        assert_eq!(report.facts_added, 1);
        assert_eq!(report.policy_added, 1);
        assert_eq!(report.sources, vec!["https://a.test/1"]);
        assert_eq!(candidate.facts.last().unwrap(), "Imports fell by 3% over the same period.");
    }

    #[test]
    fn test_context_does_not_count_toward_cap() {
        let limits = LimitsConfig {
            max_facts: 1,
            ..LimitsConfig::default()
        };
        let mut candidate = Candidate {
            context: "The cabinet met on Monday. It cleared two proposals.".to_string(),
            ..Candidate::default()
        };
        let enrichment = Enrichment {
            pages: vec![EnrichedPage {
                link: "l".to_string(),
                facts: vec!["The outlay is Rs 4,000 crore.".to_string()],
                policy_points: vec![],
            }],
        };

        assert_eq!(merge(&mut candidate, enrichment, &limits).facts_added, 1);
    }

    #[tokio::test]
    async fn test_gather_recovers_from_transient_search_failure() {
        let searcher = MockSearcher::new(hits())
            .failing_first(1)
            .with_retry(RetryPolicy::new(2, Duration::ZERO));
        let fetcher = MockFetcher::new().with_page("https://a.test/1", PAGE_ONE);
        let enricher = enricher(searcher.clone(), fetcher);

        let enrichment = enricher.gather("Rural housing scheme").await;

        assert_eq!(searcher.queries().len(), 2);
        assert_eq!(enrichment.pages.len(), 1);
    }

    #[tokio::test]
    async fn test_gather_empty_when_retries_exhausted() {
        let searcher = MockSearcher::new(hits())
            .failing_first(2)
            .with_retry(RetryPolicy::new(2, Duration::ZERO));
        let fetcher = MockFetcher::new().with_page("https://a.test/1", PAGE_ONE);
        let enricher = enricher(searcher.clone(), fetcher.clone());

        let enrichment = enricher.gather("Rural housing scheme").await;

        assert_eq!(searcher.queries().len(), 2);
        assert!(fetcher.fetched().is_empty());
        assert_eq!(enrichment, Enrichment::default());
    }

    #[test]
    fn test_merge_respects_caps() {
        let limits = LimitsConfig {
            max_facts: 2,
            ..LimitsConfig::default()
        };
        let mut candidate = Candidate {
            facts: vec!["Existing fact one.".to_string()],
            ..Candidate::default()
        };
        let enrichment = Enrichment {
            pages: vec![EnrichedPage {
                link: "l".to_string(),
                facts: vec!["New A.".to_string(), "New B.".to_string(), "New C.".to_string()],
                policy_points: vec![],
            }],
        };

        let report = merge(&mut candidate, enrichment, &limits);

        assert_eq!(report.facts_added, 1);
        assert_eq!(candidate.facts.len(), 2);
    }
}
