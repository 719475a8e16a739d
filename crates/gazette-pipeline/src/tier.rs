//! Summarization tiers and per-attempt diagnostics

use std::fmt;
use std::sync::Arc;

use gazette_domain::Provenance;
use gazette_gatekeeper::RejectionReason;

/// One candidate-producing strategy in the fallback chain
pub enum Tier<L> {
    /// A remote language model
    Remote {
        /// Which remote slot this is (primary or secondary)
        provenance: Provenance,
        /// The model client
        provider: Arc<L>,
    },

    /// Local pattern-based extraction; always produces a candidate
    Deterministic,
}

impl<L> Tier<L> {
    /// Primary remote tier
    pub fn primary(provider: L) -> Self {
        Tier::Remote {
            provenance: Provenance::PrimaryRemote,
            provider: Arc::new(provider),
        }
    }

    /// Secondary remote tier
    pub fn secondary(provider: L) -> Self {
        Tier::Remote {
            provenance: Provenance::SecondaryRemote,
            provider: Arc::new(provider),
        }
    }

    /// Provenance tag for candidates this tier produces
    pub fn provenance(&self) -> Provenance {
        match self {
            Tier::Remote { provenance, .. } => *provenance,
            Tier::Deterministic => Provenance::Deterministic,
        }
    }
}

/// Why a tier produced no usable candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierFailure {
    /// The remote call exceeded its time budget
    Timeout,

    /// The remote call failed
    Remote(String),

    /// The blocking task running the call did not complete
    Join(String),

    /// The reply held no usable candidate JSON
    Parse(String),

    /// The candidate failed validation
    Rejected(Vec<RejectionReason>),
}

impl fmt::Display for TierFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierFailure::Timeout => write!(f, "timed out"),
            TierFailure::Remote(msg) => write!(f, "remote error: {}", msg),
            TierFailure::Join(msg) => write!(f, "task join error: {}", msg),
            TierFailure::Parse(msg) => write!(f, "unparseable reply: {}", msg),
            TierFailure::Rejected(reasons) => {
                let joined = reasons
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "rejected: {}", joined)
            }
        }
    }
}

/// Outcome of asking one tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The tier's candidate was accepted
    Accepted,

    /// The tier failed and the orchestrator escalated
    Failed(TierFailure),
}

/// Diagnostic record of one tier attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierAttempt {
    /// Tier asked
    pub tier: Provenance,

    /// What happened
    pub outcome: AttemptOutcome,
}

impl TierAttempt {
    /// Whether this attempt escalated to the next tier
    pub fn escalated(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Failed(_))
    }
}

impl fmt::Display for TierAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            AttemptOutcome::Accepted => write!(f, "{}: accepted", self.tier),
            AttemptOutcome::Failed(failure) => write!(f, "{}: {}", self.tier, failure),
        }
    }
}
