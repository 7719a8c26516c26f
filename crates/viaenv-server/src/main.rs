//! `ViaEnv` server entry point.
//!
//! Loads configuration, opens the dashboard repository and starts the Axum
//! HTTP server with graceful shutdown. A background session sweeper runs
//! alongside the server and is cancelled on shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use viaenv_server::config::{DataSource, ServerConfig};
use viaenv_server::session::session_sweeper;
use viaenv_server::state::AppState;
use viaenv_storage::{DashboardRepository, FileRepository, MockRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    for warning in &config.warnings {
        warn!(%warning, "configuration value ignored");
    }
    info!(data_source = ?config.data_source, theme = config.theme.as_str(), "ViaEnv starting");

    let repo = open_repository(&config.data_source).await?;
    let state = Arc::new(AppState::new(repo, &config));

    // Shutdown signal channel.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn the idle-session sweeper.
    let sweeper_handle = {
        let store = Arc::clone(&state.sessions);
        let mut rx = shutdown_rx.clone();
        let interval_secs = config.session_sweep_interval_secs;
        tokio::spawn(async move {
            session_sweeper(store, &mut rx, interval_secs).await;
        })
    };

    let app = viaenv_server::build_router(Arc::clone(&state));

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "ViaEnv server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await
        .context("server error")?;

    info!("waiting for background workers to stop");
    let _ = tokio::time::timeout(Duration::from_secs(10), sweeper_handle).await;

    info!("ViaEnv server stopped");
    Ok(())
}

/// Open the configured data source.
async fn open_repository(source: &DataSource) -> anyhow::Result<Arc<dyn DashboardRepository>> {
    match source {
        DataSource::Mock => Ok(Arc::new(MockRepository::new())),
        DataSource::File { path } => {
            let repo = FileRepository::open(path)
                .await
                .with_context(|| format!("failed to open fixtures at {}", path.display()))?;
            info!(path = %path.display(), "serving fixtures from file");
            Ok(Arc::new(repo))
        }
    }
}

/// Wait for SIGINT or SIGTERM, then broadcast shutdown.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
    let _ = shutdown_tx.send(true);
}
