//! Parse remote model replies into candidates
//!
//! Models wrap JSON in prose or code fences, rename fields and mix strings
//! with lists. Parsing takes the first balanced JSON object in the reply and
//! reads each field under any of its known names.

use gazette_domain::{Candidate, SubSection};
use serde_json::{Map, Value};

use crate::error::ExtractorError;

const HEADING_KEYS: &[&str] = &["heading", "section_heading", "title"];
const CONTEXT_KEYS: &[&str] = &["context", "why_in_news"];
const ABOUT_KEYS: &[&str] = &["about", "background"];
const FACT_KEYS: &[&str] = &["facts", "key_points", "key_facts"];
const POLICY_KEYS: &[&str] = &["policy_points", "policy", "policies"];
const SUB_SECTION_KEYS: &[&str] = &["sub_sections", "subsections", "sections"];
const BRIEF_KEYS: &[&str] = &["detailed_brief", "brief", "summary"];
const IMPACT_KEYS: &[&str] = &["impact_points", "impact", "significance"];
const RELEVANCE_KEYS: &[&str] = &["relevance_label", "upsc_relevance", "relevance"];
const SOURCE_KEYS: &[&str] = &["source_url", "source", "url"];
const SUB_HEADING_KEYS: &[&str] = &["heading", "title"];
const SUB_POINT_KEYS: &[&str] = &["points", "bullets", "items"];

/// Parse a model reply into a [`Candidate`].
///
/// Missing fields take their defaults; `include` defaults to true and also
/// accepts "yes"/"no" strings.
pub fn parse_candidate(response: &str) -> Result<Candidate, ExtractorError> {
    let json = extract_json_object(response).ok_or_else(|| {
        ExtractorError::InvalidFormat("no JSON object found in response".to_string())
    })?;

    let value: Value = serde_json::from_str(json)?;
    let object = value
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("expected a JSON object".to_string()))?;

    Ok(Candidate {
        include: field(object, &["include"]).map(parse_flag).unwrap_or(true),
        category: field(object, &["category"]).and_then(text_value),
        heading: field(object, HEADING_KEYS).and_then(text_value).unwrap_or_default(),
        context: field(object, CONTEXT_KEYS).and_then(text_value).unwrap_or_default(),
        about: field(object, ABOUT_KEYS).and_then(text_value).unwrap_or_default(),
        facts: field(object, FACT_KEYS).map(list_value).unwrap_or_default(),
        policy_points: field(object, POLICY_KEYS).map(list_value).unwrap_or_default(),
        sub_sections: field(object, SUB_SECTION_KEYS)
            .map(sub_sections_value)
            .unwrap_or_default(),
        detailed_brief: field(object, BRIEF_KEYS).and_then(text_value).unwrap_or_default(),
        impact_points: field(object, IMPACT_KEYS).map(list_value).unwrap_or_default(),
        relevance_label: field(object, RELEVANCE_KEYS).and_then(text_value),
        source_url: field(object, SOURCE_KEYS).and_then(text_value),
    })
}

/// Locate the first balanced `{...}` in the text, ignoring braces inside
/// JSON strings
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

fn field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

fn parse_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "no" | "false" | "n" | "0" | "exclude"
        ),
        _ => true,
    }
}

fn text_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn list_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(clean_item(s)),
                Value::Number(n) => Some(n.to_string()),
                Value::Object(o) => field(o, &["text", "point", "fact"]).and_then(text_value),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => split_list(s),
        _ => Vec::new(),
    }
}

fn sub_sections_value(value: &Value) -> Vec<SubSection> {
    let Value::Array(items) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|o| SubSection {
            heading: field(o, SUB_HEADING_KEYS).and_then(text_value).unwrap_or_default(),
            points: field(o, SUB_POINT_KEYS).map(list_value).unwrap_or_default(),
        })
        .filter(|s| !s.heading.is_empty() || !s.points.is_empty())
        .collect()
}

/// Split a string the model sent in place of a list
fn split_list(text: &str) -> Vec<String> {
    text.split(['\n', '\r', ';', '•'])
        .map(clean_item)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Trim a list item and drop a leading bullet or ordinal marker
fn clean_item(item: &str) -> String {
    let trimmed = item.trim();
    let without_bullet = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .or_else(|| trimmed.strip_prefix("• "))
        .unwrap_or(trimmed);

    let digits = without_bullet
        .chars()
        .take_while(char::is_ascii_digit)
        .count();
    let without_ordinal = if digits > 0 && digits <= 2 {
        let rest = &without_bullet[digits..];
        rest.strip_prefix(". ")
            .or_else(|| rest.strip_prefix(") "))
            .unwrap_or(without_bullet)
    } else {
        without_bullet
    };

    without_ordinal.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_candidate() {
        let response = r#"{
            "include": true,
            "category": "economy",
            "heading": "RBI holds rates",
            "context": "The RBI kept the repo rate unchanged.",
            "about": "The repo rate is the rate at which RBI lends to banks.",
            "facts": ["Repo rate at 6.5%.", "Decision was unanimous."],
            "policy_points": ["Monetary Policy Committee met for three days."],
            "sub_sections": [{"heading": "Outlook", "points": ["Inflation expected to ease."]}],
            "detailed_brief": "A brief.",
            "impact_points": ["Loan rates stay stable."],
            "relevance_label": "GS Paper 3: Economy",
            "source_url": "https://news.test/rbi"
        }"#;

        let candidate = parse_candidate(response).unwrap();

        assert!(candidate.include);
        assert_eq!(candidate.category.as_deref(), Some("economy"));
        assert_eq!(candidate.heading, "RBI holds rates");
        assert_eq!(candidate.facts.len(), 2);
        assert_eq!(candidate.sub_sections[0].heading, "Outlook");
        assert_eq!(candidate.sub_sections[0].points.len(), 1);
        assert_eq!(candidate.impact_points, vec!["Loan rates stay stable."]);
        assert_eq!(candidate.source_url.as_deref(), Some("https://news.test/rbi"));
    }

    #[test]
    fn test_parse_with_fences_and_prose() {
        let response = "Here is the summary:\n```json\n{\"heading\": \"Test\", \"facts\": [\"One.\"]}\n```\nHope this helps!";
        let candidate = parse_candidate(response).unwrap();
        assert_eq!(candidate.heading, "Test");
        assert_eq!(candidate.facts, vec!["One."]);
    }

    #[test]
    fn test_takes_first_balanced_object() {
        let response = r#"{"heading": "First {braced} title", "facts": []} trailing {"heading": "Second"}"#;
        let candidate = parse_candidate(response).unwrap();
        assert_eq!(candidate.heading, "First {braced} title");
    }

    #[test]
    fn test_escaped_quotes_in_strings() {
        let response = r#"{"heading": "He said \"go}\" loudly"}"#;
        let candidate = parse_candidate(response).unwrap();
        assert_eq!(candidate.heading, "He said \"go}\" loudly");
    }

    #[test]
    fn test_field_aliases() {
        let response = r#"{
            "section_heading": "Aliased",
            "background": "Some background.",
            "key_points": ["Point one."],
            "impact": "Big impact.",
            "upsc_relevance": "GS Paper 2: Polity",
            "source": "https://news.test/x"
        }"#;

        let candidate = parse_candidate(response).unwrap();

        assert_eq!(candidate.heading, "Aliased");
        assert_eq!(candidate.about, "Some background.");
        assert_eq!(candidate.facts, vec!["Point one."]);
        assert_eq!(candidate.impact_points, vec!["Big impact."]);
        assert_eq!(candidate.relevance_label.as_deref(), Some("GS Paper 2: Polity"));
        assert_eq!(candidate.source_url.as_deref(), Some("https://news.test/x"));
    }

    #[test]
    fn test_include_flag_variants() {
        assert!(!parse_candidate(r#"{"include": "no"}"#).unwrap().include);
        assert!(parse_candidate(r#"{"include": "yes"}"#).unwrap().include);
        assert!(!parse_candidate(r#"{"include": false}"#).unwrap().include);
        assert!(parse_candidate(r#"{"heading": "x"}"#).unwrap().include);
    }

    #[test]
    fn test_string_lists_are_split() {
        let response = r#"{"facts": "- First fact.\n- Second fact; Third fact • Fourth fact", "policy_points": "1. Act passed.\n2) Rules notified."}"#;
        let candidate = parse_candidate(response).unwrap();

        assert_eq!(
            candidate.facts,
            vec!["First fact.", "Second fact", "Third fact", "Fourth fact"]
        );
        assert_eq!(candidate.policy_points, vec!["Act passed.", "Rules notified."]);
    }

    #[test]
    fn test_ordinal_years_are_kept() {
        assert_eq!(clean_item("2023. A year of reform"), "2023. A year of reform");
    }

    #[test]
    fn test_missing_fields_default() {
        let candidate = parse_candidate("{}").unwrap();
        assert!(candidate.include);
        assert!(candidate.heading.is_empty());
        assert!(candidate.facts.is_empty());
        assert!(candidate.category.is_none());
    }

    #[test]
    fn test_no_json() {
        let result = parse_candidate("I cannot summarise this article.");
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_unbalanced_json() {
        let result = parse_candidate("{\"heading\": \"cut off");
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = parse_candidate("{\"heading\": nope}");
        assert!(matches!(result, Err(ExtractorError::JsonParse(_))));
    }
}
