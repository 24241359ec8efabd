//! Main entry point for the lead intake server binary

use anyhow::Result;
use leads_core::{create_app_with_config, run_server, AppConfig, AppState};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let state = AppState::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize application state: {}", e))?;

    info!("App: {} v{}", state.app_name, state.version);
    if state.delivery_configured {
        info!("Delivery endpoint: {}", config.delivery.api_base_url);
    } else {
        warn!("Delivery credentials missing, every submission that passes validation will fail to deliver");
    }

    let sweeper = state
        .sessions
        .spawn_sweeper(config.sessions.sweep_interval(), config.sessions.idle_ttl());
    info!(
        "Started idle session sweeper (every {}s, ttl {}s)",
        config.sessions.sweep_interval_seconds, config.sessions.idle_ttl_seconds
    );

    let app = create_app_with_config(state, &config);

    run_server(app, addr).await?;

    sweeper.abort();
    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) {
            "debug"
        } else {
            "info"
        };

        format!(
            "{}={},leads_core={},tower_http=debug",
            env!("CARGO_CRATE_NAME").replace('-', "_"),
            default_level,
            default_level
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
