//! Sentence segmentation, fingerprinting and boundary-safe trimming
//!
//! Fingerprints are the single notion of "same sentence" used across the
//! pipeline: fact dedup, cross-field dedup in the assembler and novelty checks
//! during enrichment all go through [`fingerprint`].

use std::collections::HashSet;

/// Number of characters of normalized text that make up a fingerprint
pub const FINGERPRINT_CHARS: usize = 120;

const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Closing characters allowed to trail a terminator inside one sentence
const CLOSERS: [char; 5] = ['"', '\'', ')', '”', '’'];

/// Split text into trimmed, non-empty sentences.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace (or the end of
/// the text), and at every line break. Closing quotes and brackets directly
/// after a terminator stay with their sentence.
pub fn segment(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' || c == '\r' {
            push_sentence(&mut sentences, &mut current);
            i += 1;
            continue;
        }

        current.push(c);

        if TERMINATORS.contains(&c) {
            let mut j = i + 1;
            while j < chars.len() && (CLOSERS.contains(&chars[j]) || TERMINATORS.contains(&chars[j])) {
                current.push(chars[j]);
                j += 1;
            }
            if j >= chars.len() || chars[j].is_whitespace() {
                push_sentence(&mut sentences, &mut current);
            }
            i = j;
            continue;
        }

        i += 1;
    }

    push_sentence(&mut sentences, &mut current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

/// Compute the dedup key of a sentence.
///
/// Lowercased, whitespace runs collapsed, trailing punctuation removed, then
/// cut to [`FINGERPRINT_CHARS`] characters. "Prices rose." and "prices  rose"
/// share a fingerprint.
pub fn fingerprint(sentence: &str) -> String {
    let collapsed = sentence
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let stripped = collapsed.trim_end_matches(|c: char| {
        matches!(c, '.' | '!' | '?' | ';' | ':' | ',' | '…') || c.is_whitespace()
    });
    stripped.chars().take(FINGERPRINT_CHARS).collect()
}

/// Set of fingerprints already seen
#[derive(Debug, Clone, Default)]
pub struct FingerprintSet {
    seen: HashSet<String>,
}

impl FingerprintSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sentence, returning `true` if its fingerprint was new.
    /// Sentences with an empty fingerprint are never considered new.
    pub fn insert(&mut self, sentence: &str) -> bool {
        let key = fingerprint(sentence);
        if key.is_empty() {
            return false;
        }
        self.seen.insert(key)
    }

    /// Whether a sentence with the same fingerprint was recorded
    pub fn contains(&self, sentence: &str) -> bool {
        self.seen.contains(&fingerprint(sentence))
    }

    /// Number of distinct fingerprints recorded
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Keep the first occurrence of each fingerprint, preserving order
pub fn dedup_by_fingerprint<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = FingerprintSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item))
        .collect()
}

/// Segment text and drop repeated sentences
pub fn unique_sentences(text: &str) -> Vec<String> {
    dedup_by_fingerprint(segment(text))
}

/// Trim text to at most `budget` characters without cutting a word.
///
/// Prefers ending after the last sentence terminator inside the budget, then
/// before the last whitespace, and only falls back to a hard character cut
/// when the prefix holds neither.
pub fn safe_trim(text: &str, budget: usize) -> &str {
    let cut = match text.char_indices().nth(budget) {
        Some((idx, _)) => idx,
        None => return text,
    };
    let prefix = &text[..cut];

    let mut sentence_end = None;
    for (idx, c) in prefix.char_indices() {
        if TERMINATORS.contains(&c) {
            let after = idx + c.len_utf8();
            let next = text[after..].chars().next();
            if next.is_none_or(char::is_whitespace) {
                sentence_end = Some(after);
            }
        }
    }
    if let Some(end) = sentence_end {
        return &prefix[..end];
    }

    if text[cut..].starts_with(char::is_whitespace) {
        let trimmed = prefix.trim_end();
        if !trimmed.is_empty() {
            return trimmed;
        }
    }

    if let Some(ws) = prefix.rfind(char::is_whitespace) {
        let trimmed = prefix[..ws].trim_end();
        if !trimmed.is_empty() {
            return trimmed;
        }
    }

    prefix
}

/// Shorten text to at most `max_chars` characters at a word boundary,
/// ending with "…" when anything was removed
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let cut = text
        .char_indices()
        .nth(keep)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let prefix = &text[..cut];

    let at_boundary = text[cut..].starts_with(char::is_whitespace);
    let body = if at_boundary {
        prefix.trim_end()
    } else {
        match prefix.rfind(char::is_whitespace) {
            Some(ws) if !prefix[..ws].trim_end().is_empty() => prefix[..ws].trim_end(),
            _ => prefix,
        }
    };
    let body = body.trim_end_matches([',', ';', ':']);

    format!("{}…", body)
}

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_on_terminators() {
        let sentences = segment("First one. Second one! Third one? Fourth");
        assert_eq!(
            sentences,
            vec!["First one.", "Second one!", "Third one?", "Fourth"]
        );
    }

    #[test]
    fn test_segment_on_newlines() {
        let sentences = segment("Line one\n\nLine two. Still two\nLine three");
        assert_eq!(
            sentences,
            vec!["Line one", "Line two.", "Still two", "Line three"]
        );
    }

    #[test]
    fn test_segment_keeps_decimals_and_abbreviated_numbers() {
        let sentences = segment("Growth was 6.5 per cent in 2023. Exports rose.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "Growth was 6.5 per cent in 2023.");
    }

    #[test]
    fn test_segment_keeps_closing_quote() {
        let sentences = segment("He said \"we will act.\" Then he left.");
        assert_eq!(sentences, vec!["He said \"we will act.\"", "Then he left."]);
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\n  ").is_empty());
    }

    #[test]
    fn test_fingerprint_ignores_case_spacing_and_trailing_punctuation() {
        assert_eq!(fingerprint("Prices  rose sharply."), fingerprint("prices rose sharply"));
        assert_eq!(fingerprint("Done!"), "done");
    }

    #[test]
    fn test_fingerprint_is_bounded() {
        let long = "word ".repeat(100);
        assert_eq!(fingerprint(&long).chars().count(), FINGERPRINT_CHARS);
    }

    #[test]
    fn test_unique_sentences_keeps_first() {
        let sentences = unique_sentences("Prices rose. Prices rose. Rates fell. prices rose");
        assert_eq!(sentences, vec!["Prices rose.", "Rates fell."]);
    }

    #[test]
    fn test_fingerprint_set() {
        let mut set = FingerprintSet::new();
        assert!(set.insert("A sentence."));
        assert!(!set.insert("a sentence"));
        assert!(!set.insert("   "));
        assert!(set.contains("A SENTENCE!"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_safe_trim_short_text_unchanged() {
        assert_eq!(safe_trim("Short text.", 100), "Short text.");
    }

    #[test]
    fn test_safe_trim_prefers_sentence_end() {
        let text = "First sentence here. Second sentence is much longer than the budget allows.";
        assert_eq!(safe_trim(text, 40), "First sentence here.");
    }

    #[test]
    fn test_safe_trim_falls_back_to_word_boundary() {
        let text = "no terminators anywhere in this rather long line of words";
        let trimmed = safe_trim(text, 20);
        assert_eq!(trimmed, "no terminators");
    }

    #[test]
    fn test_safe_trim_hard_cut_without_whitespace() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(safe_trim(text, 5), "abcde");
    }

    #[test]
    fn test_safe_trim_counts_characters_not_bytes() {
        let text = "₹₹₹ ₹₹₹ ₹₹₹";
        assert_eq!(safe_trim(text, 5), "₹₹₹");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        let text = "The committee reviewed every proposal submitted during the session";
        let cut = truncate_with_ellipsis(text, 30);
        assert!(cut.ends_with('…'));
        assert!(cut.chars().count() <= 30);
        assert_eq!(cut, "The committee reviewed every…");

        assert_eq!(truncate_with_ellipsis("short", 30), "short");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  one two\nthree  "), 3);
        assert_eq!(word_count(""), 0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn safe_trim_respects_budget(text in "[a-zA-Z .!?₹]{0,300}", budget in 1usize..200) {
            let trimmed = safe_trim(&text, budget);
            prop_assert!(trimmed.chars().count() <= budget);
            prop_assert!(text.starts_with(trimmed));
        }

        #[test]
        fn safe_trim_ends_on_terminator_when_available(
            first in "[a-z]{3,10}( [a-z]{3,10}){1,4}\\.",
            rest in "( [a-z]{3,10}){20,40}",
        ) {
            let text = format!("{}{}", first, rest);
            let budget = first.chars().count() + 5;
            let trimmed = safe_trim(&text, budget);
            prop_assert!(trimmed.ends_with('.'));
        }

        #[test]
        fn unique_sentences_have_distinct_fingerprints(text in "[a-c .\n]{0,200}") {
            let sentences = unique_sentences(&text);
            let mut keys: Vec<String> = sentences.iter().map(|s| fingerprint(s)).collect();
            let before = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(before, keys.len());
        }
    }
}
