// Insight Garden API server
// Decision: Without DATABASE_URL the server runs on in-memory storage (dev mode)
// Decision: No hardcoded database credentials; the URL comes only from the environment

use std::sync::Arc;

use anyhow::{Context, Result};
use insight_api::{build_app, ApiConfig};
use insight_storage::StorageBackend;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "insight_api=debug,insight_storage=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("insight-api starting...");

    let config = ApiConfig::from_env().context("Invalid configuration")?;

    // Initialize storage
    let db = match &config.database {
        Some(db_config) => {
            let backend = StorageBackend::postgres(db_config)
                .await
                .context("Failed to connect to database")?;
            tracing::info!(
                max_connections = db_config.max_connections,
                "Connected to database"
            );
            backend
        }
        None => StorageBackend::in_memory(),
    };
    if db.is_dev_mode() {
        tracing::warn!(
            "DATABASE_URL not set; using in-memory storage (events are lost on restart)"
        );
    }
    let db = Arc::new(db);

    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }
    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }

    let app = build_app(db.clone(), &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    tracing::info!("insight-api stopped");

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
