//! Prompt construction for the remote summarization tiers

use crate::sentences::safe_trim;

const SYSTEM_INSTRUCTION: &str = r#"You are an editor preparing exam-oriented current affairs notes.
Read the article and return ONE JSON object. Do not add commentary, markdown or code fences.
Use only information present in the article. Never invent figures, dates or names.
Every sentence you write must be complete and end with punctuation."#;

const FIELD_GUIDE: &str = r#"Fields:
- "include": true if the article is relevant current affairs, false for sport scores, celebrity news or advertisements
- "category": one of polity, international_relations, economy, environment, science_tech, security, society, misc
- "heading": a short neutral heading, at most 12 words
- "context": one or two sentences on why this is in the news
- "about": background paragraph explaining the issue
- "facts": list of concrete facts with numbers, dates, institutions or names
- "policy_points": list of government actions, schemes, acts or rulings mentioned
- "sub_sections": list of objects with "heading" and "points" for distinct sub-topics
- "detailed_brief": 120 to 200 word explanatory summary
- "impact_points": list of consequences or significance
- "relevance_label": the exam paper and topic this belongs to, e.g. "GS Paper 3: Economy"
- "source_url": the article URL"#;

const OUTPUT_EXAMPLE: &str = r#"Output format:
{"include": true, "category": "economy", "heading": "...", "context": "...", "about": "...", "facts": ["..."], "policy_points": ["..."], "sub_sections": [{"heading": "...", "points": ["..."]}], "detailed_brief": "...", "impact_points": ["..."], "relevance_label": "...", "source_url": "..."}"#;

/// JSON schema for structured generation
pub const CANDIDATE_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "include": {"type": "boolean"},
    "category": {"type": "string"},
    "heading": {"type": "string"},
    "context": {"type": "string"},
    "about": {"type": "string"},
    "facts": {"type": "array", "items": {"type": "string"}},
    "policy_points": {"type": "array", "items": {"type": "string"}},
    "sub_sections": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "heading": {"type": "string"},
          "points": {"type": "array", "items": {"type": "string"}}
        }
      }
    },
    "detailed_brief": {"type": "string"},
    "impact_points": {"type": "array", "items": {"type": "string"}},
    "relevance_label": {"type": "string"},
    "source_url": {"type": "string"}
  },
  "required": ["include", "heading", "context", "facts"]
}"#;

/// Builder for remote summarization prompts
pub struct PromptBuilder {
    title: String,
    url: String,
    text: String,
    char_budget: usize,
}

impl PromptBuilder {
    /// Create a new prompt builder for one article
    pub fn new(title: impl Into<String>, url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            text: text.into(),
            char_budget: 3_500,
        }
    }

    /// Set the character budget for the article text
    pub fn with_char_budget(mut self, budget: usize) -> Self {
        self.char_budget = budget;
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let trimmed = safe_trim(&self.text, self.char_budget);

        format!(
            "{}\n\n{}\n\nArticle title: {}\nArticle URL: {}\n\nArticle text:\n{}\n\n{}\n",
            SYSTEM_INSTRUCTION, FIELD_GUIDE, self.title, self.url, trimmed, OUTPUT_EXAMPLE
        )
    }
}
