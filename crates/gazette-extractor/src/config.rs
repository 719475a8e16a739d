//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for normalization, fact extraction and remote prompting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Lines at or below this many characters are dropped as boilerplate
    pub min_line_chars: usize,

    /// Maximum facts the pattern extractor selects
    pub max_extracted_facts: usize,

    /// Maximum policy points the pattern extractor selects
    pub max_policy_points: usize,

    /// Longer selected sentences are cut at a word and marked with an ellipsis
    pub max_fact_chars: usize,

    /// Character budget for article text sent to remote tiers
    pub remote_char_budget: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_extracted_facts == 0 {
            return Err("max_extracted_facts must be greater than 0".to_string());
        }
        if self.max_fact_chars < 20 {
            return Err("max_fact_chars must be at least 20".to_string());
        }
        if self.remote_char_budget < 200 {
            return Err("remote_char_budget must be at least 200".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            min_line_chars: 40,
            max_extracted_facts: 6,
            max_policy_points: 5,
            max_fact_chars: 240,
            remote_char_budget: 3_500,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: smaller prompts, fewer and shorter bullets
    pub fn aggressive() -> Self {
        Self {
            min_line_chars: 50,
            max_extracted_facts: 4,
            max_policy_points: 3,
            max_fact_chars: 180,
            remote_char_budget: 2_000,
        }
    }

    /// Lenient preset: keeps short lines, larger prompts, more bullets
    pub fn lenient() -> Self {
        Self {
            min_line_chars: 25,
            max_extracted_facts: 8,
            max_policy_points: 6,
            max_fact_chars: 320,
            remote_char_budget: 6_000,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
        assert!(ExtractorConfig::aggressive().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_fact_cap() {
        let mut config = ExtractorConfig::default();
        config.max_extracted_facts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_budget() {
        let mut config = ExtractorConfig::default();
        config.remote_char_budget = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.min_line_chars, parsed.min_line_chars);
        assert_eq!(config.remote_char_budget, parsed.remote_char_budget);
    }
}
