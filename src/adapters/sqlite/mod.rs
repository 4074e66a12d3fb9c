//! SQLite database adapters for the spy cat agency.

pub mod cat_repository;
pub mod connection;
pub mod migrations;
pub mod mission_repository;
pub mod target_repository;

pub use cat_repository::SqliteCatRepository;
pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
pub use mission_repository::SqliteMissionRepository;
pub use target_repository::SqliteTargetRepository;

use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};

/// Convert a SQLite `COUNT(*)` result into an unsigned count.
pub fn to_count(value: i64) -> DomainResult<u64> {
    u64::try_from(value).map_err(|e| DomainError::SerializationError(e.to_string()))
}

/// Convert a pagination bound into a SQLite integer.
pub fn to_sql_int(value: u64) -> DomainResult<i64> {
    i64::try_from(value).map_err(|e| DomainError::SerializationError(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

pub async fn initialize_database(database_url: &str, config: Option<PoolConfig>) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(database_url, config).await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}
