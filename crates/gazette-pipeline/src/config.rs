//! Configuration for the pipeline
//!
//! One immutable [`PipelineConfig`] value is built up front and passed to
//! every component at construction time.

use gazette_extractor::ExtractorConfig;
use gazette_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or checking configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Remote summarization tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// Model used by the primary remote tier
    pub primary_model: String,

    /// Chat completions endpoint of the primary tier
    pub primary_endpoint: String,

    /// Model used by the secondary remote tier
    pub secondary_model: String,

    /// Chat completions endpoint of the secondary tier
    pub secondary_endpoint: String,

    /// Upper bound on one remote call, retries included (seconds)
    pub call_timeout_secs: u64,

    /// Timeout for a single HTTP attempt (seconds)
    pub request_timeout_secs: u64,

    /// Attempts per remote call
    pub max_retries: u32,

    /// Linear backoff step between attempts (seconds)
    pub backoff_secs: u64,

    /// Ask remote models for JSON object output
    pub structured_output: bool,
}

impl TierConfig {
    /// Get the per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Get the per-attempt timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the backoff step as a Duration
    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }

    /// Longest a provider can spend on one call: every attempt timing out
    /// plus the linear backoff sleeps between them
    pub fn worst_case_call(&self) -> Duration {
        let attempts = u64::from(self.max_retries);
        let backoff_steps = attempts.saturating_sub(1) * attempts / 2;
        Duration::from_secs(
            self.request_timeout_secs
                .saturating_mul(attempts)
                .saturating_add(self.backoff_secs.saturating_mul(backoff_steps)),
        )
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            primary_model: "llama-3.1-8b-instant".to_string(),
            primary_endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            secondary_model: "gpt-4o-mini".to_string(),
            secondary_endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            call_timeout_secs: 300,
            request_timeout_secs: 90,
            max_retries: 3,
            backoff_secs: 3,
            structured_output: true,
        }
    }
}

/// Web enrichment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Enable enrichment when a searcher is available
    pub enabled: bool,

    /// Enrich when a record has fewer facts than this
    pub min_facts: usize,

    /// Search hits to fetch
    pub result_count: usize,

    /// Upper bound on one enrichment pass (seconds)
    pub timeout_secs: u64,

    /// Character budget for the search query
    pub query_chars: usize,

    /// Attempts per search or page fetch
    pub max_retries: u32,

    /// Linear backoff step between web attempts (milliseconds)
    pub backoff_ms: u64,
}

impl EnrichmentConfig {
    /// Get the enrichment timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the web backoff step as a Duration
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_facts: 4,
            result_count: 3,
            timeout_secs: 45,
            query_chars: 120,
            max_retries: 2,
            backoff_ms: 500,
        }
    }
}

/// Record caps and batch limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum facts per record
    pub max_facts: usize,

    /// Maximum policy points per record
    pub max_policy_points: usize,

    /// Maximum impact points per record
    pub max_impact_points: usize,

    /// Maximum heading length (characters)
    pub max_heading_chars: usize,

    /// Minimum words in the detailed brief
    pub brief_min_words: usize,

    /// Maximum words in the detailed brief
    pub brief_max_words: usize,

    /// Articles with fewer cleaned words are skipped
    pub min_source_words: usize,

    /// URL-distinct articles considered per run
    pub max_candidates: usize,

    /// Records emitted per run
    pub max_inclusions: usize,

    /// Pause between processed articles (milliseconds)
    pub delay_ms: u64,

    /// Emit headline-only records when a run produced nothing
    pub headline_fallback: bool,

    /// Headlines used by the fallback
    pub headline_fallback_count: usize,
}

impl LimitsConfig {
    /// Get the inter-article delay as a Duration
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_facts: 8,
            max_policy_points: 5,
            max_impact_points: 5,
            max_heading_chars: 100,
            brief_min_words: 80,
            brief_max_words: 250,
            min_source_words: 8,
            max_candidates: 25,
            max_inclusions: 12,
            delay_ms: 1_000,
            headline_fallback: true,
            headline_fallback_count: 3,
        }
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Remote tiers
    pub tiers: TierConfig,

    /// Web enrichment
    pub enrichment: EnrichmentConfig,

    /// Record caps and batch limits
    pub limits: LimitsConfig,

    /// Normalization and fact extraction
    pub extractor: ExtractorConfig,

    /// Candidate validation
    pub validation: ValidationConfig,
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extractor.validate().map_err(ConfigError::Invalid)?;

        if self.tiers.call_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "call_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.tiers.max_retries == 0 {
            return Err(ConfigError::Invalid("max_retries must be at least 1".to_string()));
        }
        if self.tiers.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.tiers.worst_case_call() > self.tiers.call_timeout() {
            return Err(ConfigError::Invalid(format!(
                "request_timeout_secs x max_retries plus backoff ({}s) exceeds call_timeout_secs ({}s)",
                self.tiers.worst_case_call().as_secs(),
                self.tiers.call_timeout_secs
            )));
        }
        if self.enrichment.max_retries == 0 {
            return Err(ConfigError::Invalid(
                "enrichment max_retries must be at least 1".to_string(),
            ));
        }
        if self.enrichment.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "enrichment timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.limits.brief_min_words > self.limits.brief_max_words {
            return Err(ConfigError::Invalid(
                "brief_min_words cannot exceed brief_max_words".to_string(),
            ));
        }
        if self.limits.max_facts == 0 {
            return Err(ConfigError::Invalid("max_facts must be greater than 0".to_string()));
        }
        if self.limits.max_inclusions == 0 {
            return Err(ConfigError::Invalid(
                "max_inclusions must be greater than 0".to_string(),
            ));
        }
        if self.limits.max_heading_chars < 10 {
            return Err(ConfigError::Invalid(
                "max_heading_chars must be at least 10".to_string(),
            ));
        }
        Ok(())
    }

    /// Aggressive preset: short timeouts, tight prompts, strict validation
    pub fn aggressive() -> Self {
        Self {
            tiers: TierConfig {
                call_timeout_secs: 60,
                request_timeout_secs: 25,
                max_retries: 2,
                backoff_secs: 1,
                ..TierConfig::default()
            },
            enrichment: EnrichmentConfig {
                timeout_secs: 20,
                max_retries: 1,
                ..EnrichmentConfig::default()
            },
            limits: LimitsConfig::default(),
            extractor: ExtractorConfig::aggressive(),
            validation: ValidationConfig::strict(),
        }
    }

    /// Lenient preset: generous timeouts and permissive validation
    pub fn lenient() -> Self {
        Self {
            tiers: TierConfig {
                call_timeout_secs: 600,
                max_retries: 4,
                ..TierConfig::default()
            },
            enrichment: EnrichmentConfig {
                timeout_secs: 90,
                result_count: 5,
                ..EnrichmentConfig::default()
            },
            limits: LimitsConfig {
                max_inclusions: 20,
                ..LimitsConfig::default()
            },
            extractor: ExtractorConfig::lenient(),
            validation: ValidationConfig::permissive(),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
