//! Lead intake: validates contact and project request forms, screens out bots,
//! throttles resubmission and relays each lead to a chat notification channel.

pub mod config;
pub mod delivery;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod notifications;
pub mod submission;
pub mod validation;

pub use config::AppConfig;
pub use delivery::{DeliveryError, Notifier, TelegramNotifier};
pub use error::{AppError, Result};
pub use forms::{FormDefinition, FormKind, SubmissionForm};
pub use handlers::routes::create_routes;
pub use metrics::SubmissionMetrics;
pub use middleware::cors::cors_layer_from_config;
pub use notifications::{Severity, Toast};
pub use submission::{FormSession, Outcome, SessionStatus, SessionStore, SubmissionReport};

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub sessions: SessionStore,
    pub notifier: Arc<dyn Notifier>,
    pub metrics: SubmissionMetrics,
    pub delivery_configured: bool,
}

impl AppState {
    /// Builds the state with the Telegram notifier described by `config`.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let notifier = TelegramNotifier::new(&config.delivery)
            .map_err(|e| AppError::Other(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_notifier(config, Arc::new(notifier)))
    }

    pub fn with_notifier(config: &AppConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            app_name: "Lead Intake Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            sessions: SessionStore::new(config.submission.cooldown_seconds),
            notifier,
            metrics: SubmissionMetrics::new(),
            delivery_configured: config.delivery.has_credentials(),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .merge(create_routes())
        .layer(middleware::cors::cors_layer_from_config(&config.cors));

    middleware::logging::with_request_tracing(router).with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
