//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Enable truncation checks on narrative fields
    pub check_truncation: bool,

    /// Narrative text longer than this many characters must end with
    /// terminal punctuation
    pub unterminated_threshold: usize,

    /// Minimum number of substantive facts
    pub min_substantive_facts: usize,

    /// A fact is substantive when longer than this many characters
    pub substantive_fact_chars: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_truncation: true,
            unterminated_threshold: 120,
            min_substantive_facts: 2,
            substantive_fact_chars: 15,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (truncation checks only on long text,
    /// a single fact suffices)
    pub fn permissive() -> Self {
        Self {
            check_truncation: true,
            unterminated_threshold: 400,
            min_substantive_facts: 1,
            substantive_fact_chars: 10,
        }
    }

    /// Create a strict configuration
    pub fn strict() -> Self {
        Self {
            check_truncation: true,
            unterminated_threshold: 60,
            min_substantive_facts: 3,
            substantive_fact_chars: 25,
        }
    }
}
