use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub delivery: DeliveryConfig,
    pub submission: SubmissionConfig,
    pub sessions: SessionConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Credentials and endpoint for the chat-bot notification channel.
///
/// `bot_token` and `chat_id` may be empty; a missing credential is reported
/// as a failed delivery when a form is submitted, never at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    pub api_base_url: String,
    pub bot_token: String,
    pub chat_id: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    pub cooldown_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub idle_ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            delivery: DeliveryConfig::default(),
            submission: SubmissionConfig::default(),
            sessions: SessionConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.telegram.org".to_string(),
            bot_token: String::new(),
            chat_id: String::new(),
            request_timeout_seconds: 10,
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: crate::submission::DEFAULT_COOLDOWN_SECONDS,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_seconds: 1800,
            sweep_interval_seconds: 60,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

impl DeliveryConfig {
    pub fn has_credentials(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl SessionConfig {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

impl AppConfig {
    /// Defaults, then `config.toml` if present, then `APP_*` environment
    /// variables (`APP_DELIVERY__BOT_TOKEN`, `APP_SERVER__PORT`, ...).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.delivery.api_base_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "Delivery API base URL cannot be empty".to_string(),
            ));
        }

        if self.delivery.request_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Delivery request timeout must be greater than 0".to_string(),
            ));
        }

        if self.submission.cooldown_seconds == 0 {
            return Err(ConfigError::Message(
                "Submission cooldown must be greater than 0".to_string(),
            ));
        }

        if self.sessions.idle_ttl_seconds == 0 {
            return Err(ConfigError::Message(
                "Session idle TTL must be greater than 0".to_string(),
            ));
        }

        if self.sessions.sweep_interval_seconds == 0 {
            return Err(ConfigError::Message(
                "Session sweep interval must be greater than 0".to_string(),
            ));
        }

        if !self.delivery.has_credentials() {
            tracing::warn!("Delivery bot token or chat id is not set - every submission will fail to deliver");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
