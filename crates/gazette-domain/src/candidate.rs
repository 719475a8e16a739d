//! Candidate - a tier's proposed structured output

/// Context value a tier uses to say the source was too thin to summarize
///
/// A candidate carrying this context is considered valid as-is.
pub const INSUFFICIENT_SOURCE: &str = "Insufficient source content.";

/// A titled group of bullet points inside a record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubSection {
    /// Sub-section heading
    pub heading: String,

    /// Bullet points under the heading
    pub points: Vec<String>,
}

/// Proposed structured output from one summarization tier
///
/// Same shape as [`crate::StructuredRecord`] minus the assembled guarantees:
/// fields may be empty, lists may contain duplicates, and the category is
/// whatever free-form label the tier chose (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Whether the tier considers the article worth including
    pub include: bool,

    /// Free-form category label supplied by the tier
    pub category: Option<String>,

    /// Section heading
    pub heading: String,

    /// Why the article is in the news
    pub context: String,

    /// Background narrative
    pub about: String,

    /// Short factual bullets
    pub facts: Vec<String>,

    /// Governance and policy bullets
    pub policy_points: Vec<String>,

    /// Additional titled groups of points
    pub sub_sections: Vec<SubSection>,

    /// Longer narrative brief
    pub detailed_brief: String,

    /// Impact or significance bullets
    pub impact_points: Vec<String>,

    /// Free-form relevance label supplied by the tier
    pub relevance_label: Option<String>,

    /// Source URL echoed by the tier
    pub source_url: Option<String>,
}

impl Default for Candidate {
    fn default() -> Self {
        Self {
            include: true,
            category: None,
            heading: String::new(),
            context: String::new(),
            about: String::new(),
            facts: Vec::new(),
            policy_points: Vec::new(),
            sub_sections: Vec::new(),
            detailed_brief: String::new(),
            impact_points: Vec::new(),
            relevance_label: None,
            source_url: None,
        }
    }
}

impl Candidate {
    /// Whether the context is the explicit insufficient-source marker
    pub fn is_insufficient_source(&self) -> bool {
        self.context.trim() == INSUFFICIENT_SOURCE
    }

    /// Whether every narrative field (context, about, brief) is blank
    pub fn narrative_is_empty(&self) -> bool {
        self.context.trim().is_empty()
            && self.about.trim().is_empty()
            && self.detailed_brief.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidate_is_included_and_empty() {
        let candidate = Candidate::default();
        assert!(candidate.include);
        assert!(candidate.narrative_is_empty());
        assert!(candidate.facts.is_empty());
    }

    #[test]
    fn test_insufficient_source_marker() {
        let candidate = Candidate {
            context: format!("  {}  ", INSUFFICIENT_SOURCE),
            ..Candidate::default()
        };
        assert!(candidate.is_insufficient_source());
        assert!(!candidate.narrative_is_empty());
    }
}
