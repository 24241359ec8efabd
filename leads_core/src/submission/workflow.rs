use super::Outcome;
use crate::delivery::Notifier;
use crate::forms::{FormDefinition, SubmissionForm};
use tracing::{info, warn};

/// Runs one submission attempt through the spam, cooldown, validation and
/// delivery gates, in that order, stopping at the first that rejects it.
///
/// This function does not touch the cooldown; callers restart it when the
/// returned outcome [reached delivery](Outcome::reached_delivery).
pub async fn submit(
    definition: &FormDefinition,
    form: &SubmissionForm,
    honeypot: &str,
    cooldown_remaining: u64,
    notifier: &dyn Notifier,
) -> Outcome {
    let form_kind = definition.kind.as_str();

    if !honeypot.is_empty() {
        warn!(form = form_kind, outcome = "spam_rejected", "Honeypot field was filled");
        return Outcome::SpamRejected;
    }

    if cooldown_remaining > 0 {
        info!(
            form = form_kind,
            outcome = "cooldown_rejected",
            seconds_remaining = cooldown_remaining,
            "Submission attempted during cooldown"
        );
        return Outcome::CooldownRejected {
            seconds_remaining: cooldown_remaining,
        };
    }

    let validated = match definition.schema.validate(form) {
        Ok(validated) => validated,
        Err(err) => {
            info!(
                form = form_kind,
                outcome = "validation_rejected",
                field = %err.field,
                "Submission failed validation"
            );
            return Outcome::ValidationRejected {
                field: err.field,
                message: err.message,
            };
        }
    };

    let text = definition.render(&validated);

    match notifier.deliver(&text).await {
        Ok(()) => {
            info!(form = form_kind, outcome = "delivered", "Lead delivered");
            Outcome::Delivered
        }
        Err(err) => {
            warn!(form = form_kind, outcome = "delivery_failed", error = %err, "Lead delivery failed");
            Outcome::DeliveryFailed
        }
    }
}
