//! Lead submission workflow, cooldown and per-form sessions

pub mod cooldown;
pub mod session;
pub mod store;
pub mod workflow;

pub use cooldown::Cooldown;
pub use session::{FormSession, SessionStatus, SessionView, SubmissionReport};
pub use store::SessionStore;
pub use workflow::submit;

use serde::{Deserialize, Serialize};

pub const DEFAULT_COOLDOWN_SECONDS: u64 = 10;

/// Terminal result of one pass through the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    ValidationRejected { field: String, message: String },
    SpamRejected,
    CooldownRejected { seconds_remaining: u64 },
    DeliveryFailed,
    Delivered,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::ValidationRejected { .. } => "validation_rejected",
            Outcome::SpamRejected => "spam_rejected",
            Outcome::CooldownRejected { .. } => "cooldown_rejected",
            Outcome::DeliveryFailed => "delivery_failed",
            Outcome::Delivered => "delivered",
        }
    }

    /// True when an outbound request was attempted, which restarts the cooldown.
    pub fn reached_delivery(&self) -> bool {
        matches!(self, Outcome::DeliveryFailed | Outcome::Delivered)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
