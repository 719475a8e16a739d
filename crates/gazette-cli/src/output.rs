//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use gazette_domain::{Category, StructuredRecord};
use gazette_pipeline::{group_by_category, RunMetrics};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest heading shown in table output
const TABLE_HEADING_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format records grouped by category.
    pub fn format_records(&self, records: &[StructuredRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_records_json(records),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(self.format_records_quiet(records)),
        }
    }

    fn format_records_json(&self, records: &[StructuredRecord]) -> Result<String> {
        let groups: Vec<serde_json::Value> = group_by_category(records)
            .into_iter()
            .map(|(category, members)| {
                serde_json::json!({
                    "category": category.as_str(),
                    "display_name": category.display_name(),
                    "records": members.into_iter().map(record_json).collect::<Vec<_>>(),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&groups)?)
    }

    fn format_records_table(&self, records: &[StructuredRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No records produced.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Category", "Heading", "Tier", "Facts", "Policy", "Brief", "Source"]);

        for (category, members) in group_by_category(records) {
            for record in members {
                builder.push_record([
                    category.display_name().to_string(),
                    clip(&record.heading, TABLE_HEADING_CHARS),
                    record.provenance.to_string(),
                    record.facts.len().to_string(),
                    record.policy_points.len().to_string(),
                    format!("{}w", record.brief_word_count()),
                    record.source_url.clone(),
                ]);
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_records_quiet(&self, records: &[StructuredRecord]) -> String {
        group_by_category(records)
            .into_iter()
            .flat_map(|(_, members)| members.into_iter().map(|r| r.heading.clone()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a classification result.
    pub fn format_classification(
        &self,
        category: Category,
        scores: &[(Category, u32)],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let scores: serde_json::Map<String, serde_json::Value> = scores
                    .iter()
                    .map(|(c, s)| (c.as_str().to_string(), serde_json::json!(s)))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "category": category.as_str(),
                    "relevance_label": category.relevance_label(),
                    "scores": scores,
                }))?)
            }
            OutputFormat::Quiet => Ok(category.as_str().to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Category", "Score"]);
                for (c, score) in scores {
                    builder.push_record([c.display_name().to_string(), score.to_string()]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());

                Ok(format!(
                    "{}\n{}",
                    self.success(&format!("{} ({})", category.display_name(), category.relevance_label())),
                    table
                ))
            }
        }
    }

    /// Format run metrics.
    pub fn format_metrics(&self, metrics: &RunMetrics) -> String {
        match self.format {
            OutputFormat::Quiet => String::new(),
            _ => self.colorize(&metrics.summary(), "cyan"),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn record_json(record: &StructuredRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id.to_string(),
        "heading": record.heading,
        "context": record.context,
        "about": record.about,
        "facts": record.facts,
        "policy_points": record.policy_points,
        "sub_sections": record.sub_sections.iter().map(|s| serde_json::json!({
            "heading": s.heading,
            "points": s.points,
        })).collect::<Vec<_>>(),
        "detailed_brief": record.detailed_brief,
        "impact_points": record.impact_points,
        "relevance_label": record.relevance_label,
        "source_url": record.source_url,
        "has_image": record.image_ref.is_some(),
        "provenance": record.provenance.as_str(),
        "enrichment_sources": record.enrichment_sources,
    })
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}
