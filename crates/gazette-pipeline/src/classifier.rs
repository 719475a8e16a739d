//! Category classifier
//!
//! Weighted keyword scoring over the closed taxonomy. Longer, multi-word
//! keywords carry more weight than single generic terms. Close results are
//! settled by a fixed priority order, never by chance.

use std::sync::LazyLock;

use gazette_domain::Category;
use regex::Regex;
use tracing::debug;

/// Runner-up ratio (in tenths) at which the priority order decides
const CONTENDER_TENTHS: u32 = 7;

const POLITY: &[&str] = &[
    "parliament", "lok sabha", "rajya sabha", "constitution", "constitutional", "supreme court",
    "high court", "judiciary", "election commission", "election", "governor", "legislature",
    "bill", "amendment", "fundamental rights", "federalism", "panchayat", "ordinance",
    "cabinet", "governance", "speaker", "president", "chief minister", "tribunal",
];

const INTERNATIONAL: &[&str] = &[
    "bilateral", "multilateral", "united nations", "summit", "foreign minister", "diplomatic",
    "treaty", "g20", "brics", "quad", "asean", "saarc", "embassy", "ambassador",
    "foreign policy", "external affairs", "sanctions", "visit", "border talks", "indo-pacific",
];

const ECONOMY: &[&str] = &[
    "gdp", "inflation", "repo rate", "reserve bank", "rbi", "fiscal deficit", "budget",
    "tax", "gst", "exports", "imports", "trade deficit", "monetary policy", "economy",
    "investment", "banking", "msme", "agriculture", "farmers", "msp", "infrastructure",
    "stock market", "sebi", "disinvestment", "manufacturing",
];

const ENVIRONMENT: &[&str] = &[
    "climate change", "emissions", "biodiversity", "wildlife", "forest", "tiger reserve",
    "pollution", "air quality", "renewable energy", "solar", "carbon", "wetland",
    "conservation", "endangered", "national park", "cyclone", "flood", "drought",
    "heatwave", "monsoon", "environment", "ecology",
];

const SCIENCE_TECH: &[&str] = &[
    "isro", "satellite", "space mission", "launch vehicle", "artificial intelligence",
    "semiconductor", "quantum", "biotechnology", "vaccine", "genome", "research",
    "scientists", "technology", "digital", "5g", "supercomputer", "nuclear energy",
    "spacecraft", "chandrayaan", "gaganyaan",
];

const SECURITY: &[&str] = &[
    "defence", "army", "navy", "air force", "terrorism", "insurgency", "militant",
    "border security", "cyber attack", "cybersecurity", "missile", "drdo", "naxal",
    "security forces", "military exercise", "infiltration", "armed forces", "ceasefire",
];

const SOCIETY: &[&str] = &[
    "education", "health", "women", "children", "tribal", "caste", "poverty",
    "unemployment", "festival", "heritage", "culture", "unesco", "language", "literacy",
    "malnutrition", "social justice", "population", "migration", "welfare", "art",
];

struct Keyword {
    regex: Regex,
    weight: u32,
}

static KEYWORD_TABLE: LazyLock<Vec<(Category, Vec<Keyword>)>> = LazyLock::new(|| {
    [
        (Category::Polity, POLITY),
        (Category::InternationalRelations, INTERNATIONAL),
        (Category::Economy, ECONOMY),
        (Category::Environment, ENVIRONMENT),
        (Category::ScienceTech, SCIENCE_TECH),
        (Category::Security, SECURITY),
        (Category::Society, SOCIETY),
    ]
    .into_iter()
    .map(|(category, words)| (category, words.iter().map(|w| compile(w)).collect()))
    .collect()
});

fn compile(keyword: &str) -> Keyword {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
    Keyword {
        regex: Regex::new(&pattern).unwrap(),
        weight: keyword_weight(keyword),
    }
}

/// Weight of a keyword: 1, plus its word count, plus 1 for ten or more characters
pub fn keyword_weight(keyword: &str) -> u32 {
    let words = keyword.split_whitespace().count() as u32;
    let long = u32::from(keyword.chars().count() >= 10);
    1 + words + long
}

/// Weighted score for one keyword, saturating instead of wrapping
fn keyword_score(hits: usize, weight: u32) -> u32 {
    u32::try_from(hits).unwrap_or(u32::MAX).saturating_mul(weight)
}

/// Scores articles against the keyword table
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryClassifier;

impl CategoryClassifier {
    /// Create a classifier
    pub fn new() -> Self {
        Self
    }

    /// Score every category; title occurrences count twice
    pub fn scores(&self, title: &str, text: &str) -> Vec<(Category, u32)> {
        KEYWORD_TABLE
            .iter()
            .map(|(category, keywords)| {
                let score = keywords
                    .iter()
                    .map(|k| {
                        let hits = 2 * k.regex.find_iter(title).count() + k.regex.find_iter(text).count();
                        keyword_score(hits, k.weight)
                    })
                    .fold(0, u32::saturating_add);
                (*category, score)
            })
            .collect()
    }

    /// Classify by keyword score
    ///
    /// Every category scoring at least 70% of the best score is a contender;
    /// the contender earliest in [`Category::PRIORITY`] wins. With no score at
    /// all the article is [`Category::Miscellaneous`].
    pub fn score_category(&self, title: &str, text: &str) -> Category {
        let scores = self.scores(title, text);
        let best = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
        if best == 0 {
            return Category::Miscellaneous;
        }

        let winner = scores
            .iter()
            .filter(|(_, s)| *s * 10 >= best * CONTENDER_TENTHS)
            .map(|(c, _)| *c)
            .min_by_key(Category::priority_rank)
            .unwrap_or(Category::Miscellaneous);

        debug!(category = %winner.as_str(), best_score = best, "Scored category");
        winner
    }

    /// Final category for a record
    ///
    /// A model-supplied label wins when it maps onto the taxonomy; otherwise
    /// the keyword score decides.
    pub fn classify(&self, model_label: Option<&str>, title: &str, text: &str) -> Category {
        if let Some(category) = model_label.and_then(Category::from_label) {
            return category;
        }
        self.score_category(title, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_weight() {
        assert_eq!(keyword_weight("tax"), 2);
        assert_eq!(keyword_weight("repo rate"), 3);
        assert_eq!(keyword_weight("constitution"), 3);
        assert_eq!(keyword_weight("artificial intelligence"), 4);
    }

    #[test]
    fn test_keyword_score_saturates() {
        assert_eq!(keyword_score(3, 2), 6);
        assert_eq!(keyword_score(0, 4), 0);
        assert_eq!(keyword_score(usize::MAX, 1), u32::MAX);
        assert_eq!(keyword_score(u32::MAX as usize / 2 + 1, 4), u32::MAX);
    }

    #[test]
    fn test_clear_economy_article() {
        let classifier = CategoryClassifier::new();
        let category = classifier.score_category(
            "RBI keeps repo rate unchanged",
            "The Reserve Bank said inflation remains within the band and GDP growth is steady.",
        );
        assert_eq!(category, Category::Economy);
    }

    #[test]
    fn test_whole_word_matching() {
        let classifier = CategoryClassifier::new();
        // "tax" inside "taxonomy", "art" inside "party"
        let scores = classifier.scores("", "A new taxonomy for the party.");
        assert!(scores.iter().all(|(_, s)| *s == 0));
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = CategoryClassifier::new();
        assert_eq!(
            classifier.score_category("", "ISRO readies the SATELLITE for launch."),
            Category::ScienceTech
        );
    }

    #[test]
    fn test_title_counts_twice() {
        let classifier = CategoryClassifier::new();
        let from_title = classifier.scores("budget", "");
        let from_text = classifier.scores("", "budget");
        let economy = |scores: &[(Category, u32)]| {
            scores.iter().find(|(c, _)| *c == Category::Economy).map(|(_, s)| *s)
        };
        assert_eq!(economy(&from_title), Some(4));
        assert_eq!(economy(&from_text), Some(2));
    }

    #[test]
    fn test_zero_score_is_misc() {
        let classifier = CategoryClassifier::new();
        assert_eq!(
            classifier.score_category("Quiet day", "Nothing of note happened in the town today."),
            Category::Miscellaneous
        );
        assert_eq!(classifier.score_category("", ""), Category::Miscellaneous);
    }

    #[test]
    fn test_tie_resolves_by_priority() {
        let classifier = CategoryClassifier::new();
        // "tax" (economy, 2) and "bill" (polity, 2)
        assert_eq!(
            classifier.score_category("", "The tax bill."),
            Category::Polity
        );
        // "forest" (environment, 2) and "tax" (economy, 2)
        assert_eq!(
            classifier.score_category("", "A forest tax."),
            Category::Economy
        );
    }

    #[test]
    fn test_runner_up_within_seventy_percent_wins_on_priority() {
        let classifier = CategoryClassifier::new();
        // economy: "gdp" 2 + "tax" 2 = 4; polity: "bill" 2 + "election" 2 = 4 minus nothing
        // environment: "forest" 2 -> 50% of 4, not a contender
        let category = classifier.score_category("", "GDP tax bill election forest.");
        assert_eq!(category, Category::Polity);

        // international: "summit" 2 + "treaty" 2 + "bilateral" 2 = 6, economy "tax" 2: 33%
        let category = classifier.score_category("", "Summit treaty bilateral tax.");
        assert_eq!(category, Category::InternationalRelations);
    }

    #[test]
    fn test_model_label_takes_precedence() {
        let classifier = CategoryClassifier::new();
        let category = classifier.classify(
            Some("GS Paper 3: Environment"),
            "RBI keeps repo rate unchanged",
            "inflation",
        );
        assert_eq!(category, Category::Environment);
    }

    #[test]
    fn test_unmappable_label_falls_back_to_score() {
        let classifier = CategoryClassifier::new();
        let category = classifier.classify(Some("sports"), "RBI keeps repo rate unchanged", "");
        assert_eq!(category, Category::Economy);
    }
}
