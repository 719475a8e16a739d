//! Candidate validation logic

use std::fmt;

use gazette_domain::Candidate;
use gazette_extractor::FingerprintSet;
use tracing::debug;

use crate::ValidationConfig;

const TERMINAL_PUNCTUATION: [char; 9] = ['.', '!', '?', '"', '\'', ')', '”', '’', '…'];

const DANGLING_DASHES: [char; 3] = ['-', '–', '—'];

/// Result of candidate validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the candidate passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,
}

impl ValidationResult {
    fn accepted() -> Self {
        Self {
            status: ValidationStatus::Accepted,
            reasons: Vec::new(),
        }
    }

    /// Whether the candidate was accepted
    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Candidate accepted
    Accepted,

    /// Candidate rejected; the next tier should be tried
    Rejected,
}

/// How a narrative field looks cut off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationKind {
    /// Ends with a hyphen or dash
    DanglingDash,

    /// Ends with a bare run of digits
    TrailingDigits,

    /// Long text without terminal punctuation
    Unterminated {
        /// Length of the field in characters
        length: usize,
    },
}

impl fmt::Display for TruncationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruncationKind::DanglingDash => write!(f, "ends with a dangling dash"),
            TruncationKind::TrailingDigits => write!(f, "ends with a bare number"),
            TruncationKind::Unterminated { length } => {
                write!(f, "{} characters without terminal punctuation", length)
            }
        }
    }
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// A narrative field looks truncated
    TruncatedField {
        /// Name of the offending field
        field: &'static str,
        /// What looks wrong with it
        kind: TruncationKind,
    },

    /// Too few substantive facts
    InsufficientFacts {
        /// Minimum required
        required: usize,
        /// Substantive facts present
        actual: usize,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::TruncatedField { field, kind } => {
                write!(f, "{} looks truncated: {}", field, kind)
            }
            RejectionReason::InsufficientFacts { required, actual } => {
                write!(f, "{} substantive facts, {} required", actual, required)
            }
        }
    }
}

/// The Gatekeeper validates candidates before they are accepted
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Validate a candidate against the configured rules.
    ///
    /// Excluded candidates and the insufficient-source sentinel are always
    /// accepted. Otherwise every failed rule is reported and any failure
    /// rejects the candidate as a whole.
    pub fn validate(&self, candidate: &Candidate) -> ValidationResult {
        if !candidate.include || candidate.is_insufficient_source() {
            return ValidationResult::accepted();
        }

        let mut reasons = Vec::new();

        if self.config.check_truncation {
            for (field, text) in [("context", &candidate.context), ("about", &candidate.about)] {
                if let Some(kind) = self.truncation(text) {
                    reasons.push(RejectionReason::TruncatedField { field, kind });
                }
            }
        }

        let mut distinct = FingerprintSet::new();
        for fact in &candidate.facts {
            if fact.trim().chars().count() > self.config.substantive_fact_chars {
                distinct.insert(fact);
            }
        }
        let substantive = distinct.len();
        if substantive < self.config.min_substantive_facts {
            reasons.push(RejectionReason::InsufficientFacts {
                required: self.config.min_substantive_facts,
                actual: substantive,
            });
        }

        if reasons.is_empty() {
            return ValidationResult::accepted();
        }

        debug!(reasons = reasons.len(), "Candidate rejected");
        ValidationResult {
            status: ValidationStatus::Rejected,
            reasons,
        }
    }

    /// Check whether a narrative field looks cut off
    pub fn truncation(&self, text: &str) -> Option<TruncationKind> {
        let trimmed = text.trim();
        let last = trimmed.chars().last()?;

        if DANGLING_DASHES.contains(&last) {
            return Some(TruncationKind::DanglingDash);
        }
        if last.is_ascii_digit() {
            return Some(TruncationKind::TrailingDigits);
        }

        let length = trimmed.chars().count();
        if length > self.config.unterminated_threshold && !TERMINAL_PUNCTUATION.contains(&last) {
            return Some(TruncationKind::Unterminated { length });
        }

        None
    }
}
