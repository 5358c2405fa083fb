//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, schema migrations, the first admin key
//! and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::database::{Database, EmbeddedMigrations, Migrator};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::base62;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Database connection pool
/// - Embedded schema migrations
/// - An admin API key if the store has none
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - A migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let db = Arc::new(Database::connect(&config.database, &config.pool).await?);
    tracing::info!(kind = %db.kind(), "Connected to database");

    let applied = Migrator::new(&db)
        .apply_all(&EmbeddedMigrations)
        .await
        .context("Failed to apply migrations")?;

    if applied.is_empty() {
        tracing::info!("Database schema is up to date");
    } else {
        tracing::info!(?applied, "Applied migrations");
    }

    let state = AppState::new(db.clone(), config.root_url.clone());

    if let Some(issued) = state
        .key_service
        .bootstrap_admin_key()
        .await
        .context("Failed to create initial admin key")?
    {
        tracing::warn!(
            key = %issued.plaintext,
            "Created a new admin API key. It is shown only once"
        );
    }

    let app = app_router(state, Duration::from_secs(config.request_timeout_secs));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on http://{addr}");
    tracing::info!("Try http://{addr}/a/{}", base62::encode("example.com"));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    db.close().await;

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}
