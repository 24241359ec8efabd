//! Outbound delivery of formatted lead messages

pub mod telegram;

pub use telegram::TelegramNotifier;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("delivery credentials are not configured")]
    MissingCredentials,

    #[error("endpoint rejected the message with status {0}")]
    Rejected(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A channel that relays one lead message to the team.
///
/// Implementations make exactly one attempt per call.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError>;
}
