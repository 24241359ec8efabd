//! User-facing toast notifications produced by the submission workflow

use crate::forms::FormDefinition;
use crate::submission::Outcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Destructive,
}

/// Static title/description pair a form supplies for its own outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastCopy {
    pub title: &'static str,
    pub description: &'static str,
}

impl ToastCopy {
    pub const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Toast {
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Normal,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn for_outcome(outcome: &Outcome, definition: &FormDefinition) -> Self {
        match outcome {
            Outcome::SpamRejected => Toast::destructive("Submission blocked", "Spam detected."),
            Outcome::CooldownRejected { seconds_remaining } => Toast::destructive(
                "Please wait",
                format!("Try again in {} seconds.", seconds_remaining),
            ),
            Outcome::ValidationRejected { message, .. } => {
                Toast::destructive("Validation Error", message.clone())
            }
            Outcome::DeliveryFailed => {
                Toast::destructive(definition.failed.title, definition.failed.description)
            }
            Outcome::Delivered => {
                Toast::normal(definition.delivered.title, definition.delivered.description)
            }
        }
    }
}
