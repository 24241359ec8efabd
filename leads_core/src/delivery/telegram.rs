//! Telegram Bot API `sendMessage` delivery

use super::{DeliveryError, Notifier};
use crate::config::DeliveryConfig;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &DeliveryConfig) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.trim().to_string(),
            chat_id: config.chat_id.trim().to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base_url, self.bot_token)
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_base_url", &self.api_base_url)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        if self.bot_token.is_empty() || self.chat_id.is_empty() {
            warn!("Skipping delivery: bot token or chat id is not configured");
            return Err(DeliveryError::MissingCredentials);
        }

        let response = self
            .client
            .post(self.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Lead message delivered");
            Ok(())
        } else {
            warn!(status = status.as_u16(), "Delivery endpoint rejected lead message");
            Err(DeliveryError::Rejected(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let config = DeliveryConfig {
            api_base_url: "https://api.telegram.org/".to_string(),
            bot_token: "123:abc".to_string(),
            chat_id: "42".to_string(),
            request_timeout_seconds: 5,
        };
        let notifier = TelegramNotifier::new(&config).unwrap();
        assert_eq!(notifier.endpoint(), "https://api.telegram.org/bot123:abc/sendMessage");
    }

    #[test]
    fn test_debug_hides_token() {
        let config = DeliveryConfig {
            bot_token: "secret-token".to_string(),
            chat_id: "42".to_string(),
            ..DeliveryConfig::default()
        };
        let notifier = TelegramNotifier::new(&config).unwrap();
        assert!(!format!("{:?}", notifier).contains("secret-token"));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_without_network() {
        let notifier = TelegramNotifier::new(&DeliveryConfig::default()).unwrap();
        let result = notifier.deliver("hello").await;
        assert!(matches!(result, Err(DeliveryError::MissingCredentials)));
    }
}
