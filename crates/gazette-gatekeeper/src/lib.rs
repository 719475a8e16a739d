//! Gazette Gatekeeper
//!
//! Decides whether a summarization tier's candidate is good enough to keep.
//!
//! The Gatekeeper checks:
//! - Excluded articles and the insufficient-source sentinel (always valid)
//! - Narrative fields that look cut off mid-sentence
//! - A minimum number of distinct substantive facts
//!
//! Any failed check rejects the whole candidate; the orchestrator then moves
//! on to the next tier.
//!
//! # Examples
//!
//! ```
//! use gazette_domain::Candidate;
//! use gazette_gatekeeper::{Gatekeeper, ValidationStatus};
//!
//! let gatekeeper = Gatekeeper::default_config();
//! let candidate = Candidate {
//!     context: "Talks stalled over the next step-".to_string(),
//!     ..Candidate::default()
//! };
//!
//! let result = gatekeeper.validate(&candidate);
//! assert_eq!(result.status, ValidationStatus::Rejected);
//! ```

#![warn(missing_docs)]

mod config;
mod validator;

pub use config::ValidationConfig;
pub use validator::{Gatekeeper, RejectionReason, TruncationKind, ValidationResult, ValidationStatus};
