//! Database operations for the minimart `SQLite` storage.
//!
//! # Tables
//!
//! - `product` - The catalog (the only persisted state; carts live in the
//!   session store, never in the database)
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/server/migrations/` at compile time
//! and applied by [`bootstrap`] during startup, before the listener binds.

pub mod products;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if it does not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string is invalid or the
/// database cannot be opened.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply embedded migrations.
///
/// Runs exactly once during startup; sqlx tracks applied migrations in the
/// database, so restarting an already-migrated database is a no-op.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails to apply.
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
