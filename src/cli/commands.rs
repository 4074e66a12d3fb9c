use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

use crate::adapters::catalog::{BreedCache, HttpBreedCatalog};
use crate::adapters::http::{AppState, HttpServer};
use crate::adapters::sqlite::{initialize_database, verify_connection, PoolConfig};
use crate::domain::models::Config;

async fn open_database(config: &Config) -> Result<SqlitePool> {
    let pool_config = PoolConfig {
        max_connections: config.database.max_connections,
        ..PoolConfig::default()
    };
    let pool = initialize_database(&config.database.url, Some(pool_config))
        .await
        .context("Failed to initialize database")?;
    verify_connection(&pool).await.context("Database is not reachable")?;
    Ok(pool)
}

/// Run the API until a shutdown signal arrives.
pub async fn serve(config: Config) -> Result<()> {
    let pool = open_database(&config).await?;

    let catalog = HttpBreedCatalog::new(&config.catalog, BreedCache::new())
        .context("Failed to create breed catalog client")?;
    let state = AppState::new(pool.clone(), Arc::new(catalog), config.missions);

    HttpServer::new(config.server, state)
        .serve_with_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Apply migrations and exit.
pub async fn migrate(config: Config) -> Result<()> {
    let pool = open_database(&config).await?;
    pool.close().await;
    info!(url = %config.database.url, "Database is up to date");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_creates_and_verifies_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("agency.db");
        let mut config = Config::default();
        config.database.url = format!("sqlite:{}", db_path.display());

        migrate(config.clone()).await.unwrap();
        assert!(db_path.exists());

        let pool = open_database(&config).await.unwrap();
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('cats', 'missions', 'targets')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables, 3);
        pool.close().await;
    }
}
