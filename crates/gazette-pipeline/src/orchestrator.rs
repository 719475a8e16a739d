//! Tiered summarizer orchestrator
//!
//! Asks each remote tier in order, validating every candidate, and falls back
//! to the deterministic tier, which always produces a candidate.

use std::sync::Arc;
use std::time::Duration;

use gazette_domain::traits::LlmProvider;
use gazette_domain::{Candidate, Provenance};
use gazette_extractor::{parse_candidate, NormalizedText, PromptBuilder, CANDIDATE_SCHEMA};
use gazette_gatekeeper::Gatekeeper;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::offline::OfflineSummarizer;
use crate::tier::{AttemptOutcome, Tier, TierAttempt, TierFailure};

/// The accepted candidate together with how it was reached
#[derive(Debug, Clone)]
pub struct Summary {
    /// Accepted candidate
    pub candidate: Candidate,

    /// Tier that produced it
    pub provenance: Provenance,

    /// Every tier asked, in order
    pub attempts: Vec<TierAttempt>,
}

impl Summary {
    /// Number of tiers that failed before acceptance
    pub fn escalations(&self) -> usize {
        self.attempts.iter().filter(|a| a.escalated()).count()
    }
}

/// Ordered fallback over candidate-producing tiers
pub struct Orchestrator<L> {
    tiers: Vec<Tier<L>>,
    gatekeeper: Gatekeeper,
    offline: OfflineSummarizer,
    call_timeout: Duration,
    char_budget: usize,
    structured_output: bool,
}

impl<L> Orchestrator<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create an orchestrator holding only the deterministic tier
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            tiers: vec![Tier::Deterministic],
            gatekeeper: Gatekeeper::new(config.validation.clone()),
            offline: OfflineSummarizer::new(&config.extractor),
            call_timeout: config.tiers.call_timeout(),
            char_budget: config.extractor.remote_char_budget,
            structured_output: config.tiers.structured_output,
        }
    }

    /// Add the primary remote tier
    pub fn with_primary(self, provider: L) -> Self {
        self.with_tier(Tier::primary(provider))
    }

    /// Add the secondary remote tier
    pub fn with_secondary(self, provider: L) -> Self {
        self.with_tier(Tier::secondary(provider))
    }

    fn with_tier(mut self, tier: Tier<L>) -> Self {
        let provenance = tier.provenance();
        self.tiers.retain(|t| t.provenance() != provenance);
        self.tiers.push(tier);
        self.tiers.sort_by_key(Tier::provenance);
        self
    }

    /// Tier order, deterministic last
    pub fn tier_order(&self) -> Vec<Provenance> {
        self.tiers.iter().map(Tier::provenance).collect()
    }

    /// Produce one accepted candidate for an article
    ///
    /// Remote failures and rejected candidates escalate to the next tier and
    /// are recorded in [`Summary::attempts`]; nothing is propagated.
    pub async fn summarize(&self, title: &str, url: &str, text: &NormalizedText) -> Summary {
        let prompt = PromptBuilder::new(title, url, text.cleaned.as_str())
            .with_char_budget(self.char_budget)
            .build();
        let mut attempts = Vec::new();

        for tier in &self.tiers {
            let (provenance, provider) = match tier {
                Tier::Remote {
                    provenance,
                    provider,
                } => (*provenance, provider),
                Tier::Deterministic => break,
            };

            debug!(tier = %provenance, "Asking tier");
            match self.ask_remote(provider, &prompt).await {
                Ok(candidate) => {
                    info!(tier = %provenance, "Candidate accepted");
                    attempts.push(TierAttempt {
                        tier: provenance,
                        outcome: AttemptOutcome::Accepted,
                    });
                    return Summary {
                        candidate,
                        provenance,
                        attempts,
                    };
                }
                Err(failure) => {
                    warn!(tier = %provenance, reason = %failure, "Escalating to next tier");
                    attempts.push(TierAttempt {
                        tier: provenance,
                        outcome: AttemptOutcome::Failed(failure),
                    });
                }
            }
        }

        let candidate = self.offline.summarize(title, url, text);
        info!(tier = %Provenance::Deterministic, "Candidate accepted");
        attempts.push(TierAttempt {
            tier: Provenance::Deterministic,
            outcome: AttemptOutcome::Accepted,
        });

        Summary {
            candidate,
            provenance: Provenance::Deterministic,
            attempts,
        }
    }

    async fn ask_remote(&self, provider: &Arc<L>, prompt: &str) -> Result<Candidate, TierFailure> {
        let reply = timeout(self.call_timeout, self.call_llm(provider, prompt))
            .await
            .map_err(|_| TierFailure::Timeout)??;

        debug!("Remote reply length: {} chars", reply.len());

        let candidate = parse_candidate(&reply).map_err(|e| TierFailure::Parse(e.to_string()))?;

        let result = self.gatekeeper.validate(&candidate);
        if !result.is_valid() {
            return Err(TierFailure::Rejected(result.reasons));
        }

        Ok(candidate)
    }

    /// Call the LLM provider
    async fn call_llm(&self, provider: &Arc<L>, prompt: &str) -> Result<String, TierFailure> {
        let llm = Arc::clone(provider);
        let prompt = prompt.to_string();
        let structured = self.structured_output;

        // Call in a blocking context since LlmProvider is not async
        tokio::task::spawn_blocking(move || {
            let reply = if structured {
                llm.generate_structured(&prompt, CANDIDATE_SCHEMA)
            } else {
                llm.generate(&prompt)
            };
            reply.map_err(|e| TierFailure::Remote(e.to_string()))
        })
        .await
        .map_err(|e| TierFailure::Join(e.to_string()))?
    }
}
