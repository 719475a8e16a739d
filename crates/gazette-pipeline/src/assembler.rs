//! Structured record assembler
//!
//! Turns an accepted candidate into the final record: caps and dedups every
//! list, removes sentences repeated across narrative fields, synthesizes a
//! detailed brief of bounded length and makes sure the record always has
//! something to say.

use gazette_domain::{
    Candidate, Category, Provenance, RawArticle, RecordId, StructuredRecord, SubSection,
    INSUFFICIENT_SOURCE,
};
use gazette_extractor::{
    dedup_by_fingerprint, segment, truncate_with_ellipsis, word_count, FingerprintSet,
};

use crate::config::LimitsConfig;

/// Context of records produced by the headline fallback
pub const HEADLINE_CONTEXT: &str = "Auto-added headline — no AI summary available today.";

/// Facts quoted directly in a synthesized brief before the rest turn into implications
const LEADING_FACTS: usize = 3;

const TERMINAL: [char; 9] = ['.', '!', '?', '"', '\'', ')', '”', '’', '…'];

/// Builds [`StructuredRecord`]s from accepted candidates
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    limits: LimitsConfig,
}

impl RecordAssembler {
    /// Create an assembler with the given caps
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Assemble the final record for an article
    pub fn assemble(
        &self,
        candidate: Candidate,
        category: Category,
        provenance: Provenance,
        article: &RawArticle,
        enrichment_sources: Vec<String>,
    ) -> StructuredRecord {
        let heading = self.heading(&candidate.heading, &article.title);
        let facts = capped(candidate.facts, self.limits.max_facts);
        let policy_points = capped(candidate.policy_points, self.limits.max_policy_points);
        let impact_points = capped(candidate.impact_points, self.limits.max_impact_points);
        let sub_sections = candidate
            .sub_sections
            .into_iter()
            .map(|s| SubSection {
                heading: s.heading.trim().to_string(),
                points: capped(s.points, usize::MAX),
            })
            .filter(|s| !s.heading.is_empty() || !s.points.is_empty())
            .collect();

        let mut context = candidate.context.trim().to_string();
        let mut about_sentences = self.distinct_about(&candidate.about, &context, &facts);

        if context.is_empty() {
            context = if !about_sentences.is_empty() {
                about_sentences.remove(0)
            } else if !heading.is_empty() {
                heading.clone()
            } else {
                INSUFFICIENT_SOURCE.to_string()
            };
        }
        let about = about_sentences.join(" ");

        let relevance_label = category.relevance_label().to_string();
        let detailed_brief = self.brief(
            &candidate.detailed_brief,
            &BriefParts {
                heading: &heading,
                about: &about,
                facts: &facts,
                policy_points: &policy_points,
                impact_points: &impact_points,
                relevance_label: &relevance_label,
            },
        );

        let source_url = if article.url.trim().is_empty() {
            candidate.source_url.unwrap_or_default()
        } else {
            article.url.clone()
        };

        StructuredRecord {
            id: RecordId::new(),
            include: true,
            category,
            heading,
            context,
            about,
            facts,
            policy_points,
            sub_sections,
            detailed_brief,
            impact_points,
            relevance_label,
            source_url,
            image_ref: article.image.clone(),
            provenance,
            enrichment_sources,
        }
    }

    /// Placeholder record carrying only an article's headline
    pub fn headline(&self, article: &RawArticle) -> StructuredRecord {
        let candidate = Candidate {
            heading: article.title.clone(),
            context: HEADLINE_CONTEXT.to_string(),
            facts: vec![article.title.clone()],
            ..Candidate::default()
        };
        self.assemble(
            candidate,
            Category::Miscellaneous,
            Provenance::HeadlineFallback,
            article,
            Vec::new(),
        )
    }

    fn heading(&self, heading: &str, title: &str) -> String {
        let chosen = match heading.trim() {
            "" => title.trim(),
            h => h,
        };
        truncate_with_ellipsis(chosen, self.limits.max_heading_chars)
    }

    /// Background sentences not already stated in the context or the facts
    fn distinct_about(&self, about: &str, context: &str, facts: &[String]) -> Vec<String> {
        let mut seen = FingerprintSet::new();
        for sentence in segment(context) {
            seen.insert(&sentence);
        }
        for fact in facts {
            seen.insert(fact);
        }
        segment(about)
            .into_iter()
            .filter(|s| seen.insert(s))
            .collect()
    }

    fn brief(&self, supplied: &str, parts: &BriefParts<'_>) -> String {
        let min = self.limits.brief_min_words;
        let max = self.limits.brief_max_words;

        let supplied = supplied.trim();
        if word_count(supplied) >= min {
            return truncate_words(supplied, max);
        }

        let mut brief = BriefBuilder::new(supplied);
        brief.push(parts.about);
        for fact in parts.facts.iter().take(LEADING_FACTS) {
            brief.push(fact);
        }
        if let Some(point) = parts.policy_points.first() {
            brief.push(point);
        }

        let extras = parts
            .facts
            .iter()
            .skip(LEADING_FACTS)
            .map(|fact| format!("Implication: {}", fact))
            .chain(parts.policy_points.iter().skip(1).cloned())
            .chain(parts.impact_points.iter().cloned());
        for extra in extras {
            if brief.words() >= min {
                break;
            }
            brief.push(&extra);
        }

        let closings = closing_sentences(parts.heading, parts.relevance_label);
        for closing in closings.iter().cycle() {
            if brief.words() >= min {
                break;
            }
            brief.push_repeatable(closing);
        }

        truncate_words(&brief.finish(), max)
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(LimitsConfig::default())
    }
}

struct BriefParts<'a> {
    heading: &'a str,
    about: &'a str,
    facts: &'a [String],
    policy_points: &'a [String],
    impact_points: &'a [String],
    relevance_label: &'a str,
}

/// Accumulates brief sentences, skipping any already present
struct BriefBuilder {
    sentences: Vec<String>,
    seen: FingerprintSet,
    words: usize,
}

impl BriefBuilder {
    fn new(start: &str) -> Self {
        let mut builder = Self {
            sentences: Vec::new(),
            seen: FingerprintSet::new(),
            words: 0,
        };
        builder.push(start);
        builder
    }

    fn push(&mut self, text: &str) {
        for sentence in segment(text) {
            if self.seen.insert(&sentence) {
                self.append(sentence);
            }
        }
    }

    fn push_repeatable(&mut self, text: &str) {
        self.append(text.to_string());
    }

    fn append(&mut self, sentence: String) {
        let sentence = terminated(sentence);
        self.words += word_count(&sentence);
        self.sentences.push(sentence);
    }

    fn words(&self) -> usize {
        self.words
    }

    fn finish(self) -> String {
        self.sentences.join(" ")
    }
}

fn closing_sentences(heading: &str, relevance_label: &str) -> Vec<String> {
    let topic = if heading.trim().is_empty() {
        "this development"
    } else {
        heading.trim().trim_end_matches(TERMINAL)
    };
    vec![
        format!("This report on {} is relevant to {}.", topic, relevance_label),
        "Aspirants should note the institutions and figures mentioned in the coverage.".to_string(),
        format!("The issue connects current events with the wider themes of {}.", relevance_label),
        "Revision should cover the background of the issue and the official response to it."
            .to_string(),
        format!("Further developments on {} are likely to be reported in the coming weeks.", topic),
        "The topic can be linked with related questions asked in previous examinations."
            .to_string(),
        "Reading the original report at the source link gives additional detail.".to_string(),
    ]
}

/// Keep the first occurrence of each item, trimmed and non-empty, up to `cap`
fn capped(items: Vec<String>, cap: usize) -> Vec<String> {
    dedup_by_fingerprint(
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    )
    .into_iter()
    .take(cap)
    .collect()
}

fn terminated(sentence: String) -> String {
    match sentence.chars().last() {
        Some(c) if TERMINAL.contains(&c) => sentence,
        _ => format!("{}.", sentence),
    }
}

/// Cut text to at most `max_words` words, ending with "…" when cut
fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.to_string();
    }
    let kept = words[..max_words].join(" ");
    format!("{}…", kept.trim_end_matches([',', ';', ':', '.']))
}
