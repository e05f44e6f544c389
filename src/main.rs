//! Swapstation portal server
//!
//! Serves the backend proxy and session-cookie endpoints.
//! Reads configuration from TOML (~/.config/swapstation/config.toml).

use tracing::{error, info};

use swapstation::shared::ShutdownSignal;
use swapstation::{create_router, default_config_path, AppConfig, PortalState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("SWAPSTATION_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            let mut cfg = AppConfig::default();
            cfg.apply_env();
            cfg
        }
    };

    info!(backend = %config.backend.base_url, "Starting swapstation portal");

    let state = PortalState::from_config(&config)?;
    let router = create_router(state);

    // ── Shutdown handling ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_os_signals();

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Portal listening on http://{}", addr);

    let signal = shutdown.clone();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        signal.wait().await;
        info!("Portal received shutdown signal");
    });

    let grace = std::time::Duration::from_secs(config.server.shutdown_timeout);
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Portal server error: {}", e);
                return Err(e.into());
            }
        }
        _ = async {
            shutdown.wait().await;
            tokio::time::sleep(grace).await;
        } => {
            error!("Connections still open after {}s, exiting", grace.as_secs());
        }
    }

    info!("Swapstation portal shutdown complete");
    Ok(())
}
