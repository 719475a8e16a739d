//! Category module - the closed subject taxonomy

use std::fmt;

/// Subject bucket a record is filed under
///
/// The taxonomy is closed: every record carries exactly one of these values.
/// [`Category::Miscellaneous`] is the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Constitution, Parliament, judiciary, governance, ethics
    Polity,

    /// Bilateral and multilateral relations
    InternationalRelations,

    /// Macro economy, finance, agriculture, infrastructure
    Economy,

    /// Ecology, climate, conservation, disasters
    Environment,

    /// Space, biotech, digital technology, research
    ScienceTech,

    /// Defence, internal security, cyber security
    Security,

    /// History, art and culture, society, geography
    Society,

    /// Catch-all for anything the other buckets do not claim
    Miscellaneous,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 8] = [
        Category::Polity,
        Category::InternationalRelations,
        Category::Economy,
        Category::Environment,
        Category::ScienceTech,
        Category::Security,
        Category::Society,
        Category::Miscellaneous,
    ];

    /// Order in which the renderer lays out category groups
    pub const DISPLAY_ORDER: [Category; 8] = Self::ALL;

    /// Fixed tie-break priority for ambiguous classifications
    ///
    /// Earlier entries win when several categories score within the
    /// ambiguity margin of the best score.
    pub const PRIORITY: [Category; 8] = [
        Category::Polity,
        Category::Economy,
        Category::Environment,
        Category::InternationalRelations,
        Category::ScienceTech,
        Category::Security,
        Category::Society,
        Category::Miscellaneous,
    ];

    /// Stable machine identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Polity => "polity",
            Category::InternationalRelations => "international_relations",
            Category::Economy => "economy",
            Category::Environment => "environment",
            Category::ScienceTech => "science_tech",
            Category::Security => "security",
            Category::Society => "society",
            Category::Miscellaneous => "misc",
        }
    }

    /// Human-readable section title
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Polity => "Polity & Governance",
            Category::InternationalRelations => "International Relations",
            Category::Economy => "Economy",
            Category::Environment => "Environment & Ecology",
            Category::ScienceTech => "Science & Technology",
            Category::Security => "Security & Defence",
            Category::Society => "Society & Culture",
            Category::Miscellaneous => "Miscellaneous",
        }
    }

    /// Exam relevance label stamped onto records of this category
    pub fn relevance_label(&self) -> &'static str {
        match self {
            Category::Polity => "GS Paper 2: Polity & Governance",
            Category::InternationalRelations => "GS Paper 2: International Relations",
            Category::Economy => "GS Paper 3: Economy",
            Category::Environment => "GS Paper 3: Environment & Ecology",
            Category::ScienceTech => "GS Paper 3: Science & Technology",
            Category::Security => "GS Paper 3: Internal Security",
            Category::Society => "GS Paper 1: Society & Culture",
            Category::Miscellaneous => "General current affairs",
        }
    }

    /// Position in [`Category::PRIORITY`] (lower wins)
    pub fn priority_rank(&self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::PRIORITY.len())
    }

    /// Parse a machine identifier produced by [`Category::as_str`]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.trim().to_lowercase())
    }

    /// Normalize a free-form label into the taxonomy
    ///
    /// Understands machine identifiers, display names, subject words
    /// ("Economy & Finance", "Internal Security") and exam paper codes
    /// ("GS2", "GS-III"). Subject stems only match at the start of a word,
    /// so "cyberspace" does not read as "space". Returns `None` when nothing
    /// matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use gazette_domain::Category;
    ///
    /// assert_eq!(Category::from_label("GS-II"), Some(Category::Polity));
    /// assert_eq!(Category::from_label("Economy & Finance"), Some(Category::Economy));
    /// assert_eq!(Category::from_label("Misc"), Some(Category::Miscellaneous));
    /// assert_eq!(Category::from_label("???"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        let compact: String = label
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        if compact.is_empty() {
            return None;
        }

        if let Some(category) = Self::parse(label) {
            return Some(category);
        }

        if CATCH_ALL_LABELS.contains(&compact.as_str()) {
            return Some(Category::Miscellaneous);
        }

        let words: Vec<String> = label
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        for (stem, category) in SUBJECT_PATTERNS {
            if words.iter().any(|word| word.starts_with(stem)) {
                return Some(*category);
            }
        }

        // Exam paper codes, longest roman numeral first
        for (needle, category) in PAPER_PATTERNS {
            if compact.starts_with(needle) {
                return Some(*category);
            }
        }

        None
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Miscellaneous
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("Unknown category: {}", s))
    }
}

const CATCH_ALL_LABELS: &[&str] = &[
    "misc",
    "miscellaneous",
    "general",
    "generalstudies",
    "other",
    "others",
    "ffp",
    "factsforprelims",
];

const SUBJECT_PATTERNS: &[(&str, Category)] = &[
    ("international", Category::InternationalRelations),
    ("foreign", Category::InternationalRelations),
    ("bilateral", Category::InternationalRelations),
    ("diplomac", Category::InternationalRelations),
    ("geopolit", Category::InternationalRelations),
    ("polity", Category::Polity),
    ("governance", Category::Polity),
    ("constitution", Category::Polity),
    ("judiciary", Category::Polity),
    ("ethic", Category::Polity),
    ("econom", Category::Economy),
    ("financ", Category::Economy),
    ("budget", Category::Economy),
    ("agricultur", Category::Economy),
    ("banking", Category::Economy),
    ("environment", Category::Environment),
    ("ecolog", Category::Environment),
    ("climate", Category::Environment),
    ("biodiversity", Category::Environment),
    ("disaster", Category::Environment),
    ("science", Category::ScienceTech),
    ("technolog", Category::ScienceTech),
    ("space", Category::ScienceTech),
    ("security", Category::Security),
    ("defence", Category::Security),
    ("defense", Category::Security),
    ("society", Category::Society),
    ("social", Category::Society),
    ("culture", Category::Society),
    ("heritage", Category::Society),
    ("history", Category::Society),
    ("geograph", Category::Society),
    ("mapping", Category::Society),
];

const PAPER_PATTERNS: &[(&str, Category)] = &[
    ("gsiv", Category::Polity),
    ("gsiii", Category::Economy),
    ("gsii", Category::Polity),
    ("gsi", Category::Society),
    ("gs4", Category::Polity),
    ("gs3", Category::Economy),
    ("gs2", Category::Polity),
    ("gs1", Category::Society),
];
