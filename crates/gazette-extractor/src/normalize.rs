//! Boilerplate removal for scraped article text

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ExtractorConfig;
use crate::sentences::unique_sentences;

static RE_BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:see all newsletters|e-?paper|advertisement|login|subscribe|related stories|continue reading|read more|click here)\b",
    )
    .unwrap()
});

/// Lines written entirely in capitals and spaces are navigation menus
static RE_MENU_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z\s]{15,}$").unwrap());

static RE_BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Cleans scraped page text down to article prose
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    min_line_chars: usize,
}

impl TextNormalizer {
    /// Create a normalizer from extractor configuration
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            min_line_chars: config.min_line_chars,
        }
    }

    /// Remove boilerplate phrases, short lines and menu lines.
    ///
    /// Kept lines are joined with blank lines between them. The result is
    /// empty when nothing survives; that is not an error.
    pub fn normalize(&self, raw: &str) -> String {
        let without_phrases = RE_BOILERPLATE.replace_all(raw, "");

        let kept: Vec<&str> = without_phrases
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() > self.min_line_chars)
            .filter(|line| !RE_MENU_LINE.is_match(line))
            .collect();

        let joined = kept.join("\n\n");
        RE_BLANK_RUN.replace_all(&joined, "\n\n").trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

/// Cleaned article text together with its unique sentences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    /// Text after boilerplate removal
    pub cleaned: String,

    /// Sentences in document order, one per fingerprint
    pub sentences: Vec<String>,
}

impl NormalizedText {
    /// Normalize raw text and segment it
    pub fn from_raw(raw: &str, normalizer: &TextNormalizer) -> Self {
        let cleaned = normalizer.normalize(raw);
        let sentences = unique_sentences(&cleaned);
        Self { cleaned, sentences }
    }

    /// Whether normalization left no text at all
    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }
}
