//! Table store access.
//!
//! # Tables
//!
//! - `admin_users` - Admin credentials, looked up by email at login
//! - `pin_codes` - PIN records with an `is_active` flag and optional description
//!
//! Every operation is a single-table select-by-filter, insert or update. There
//! are no transactions spanning both tables.
//!
//! # Backends
//!
//! - [`Database::Postgres`] - hosted `PostgreSQL` through a `sqlx` pool
//! - [`Database::Memory`] - process-local tables for tests and local runs
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p pin-gate-cli -- migrate
//! ```

pub mod admin_users;
pub mod memory;
pub mod pin_codes;

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admin_users::AdminUserRepository;
pub use memory::MemoryTables;
pub use pin_codes::PinCodeRepository;

/// Schema migrations for the `PostgreSQL` backend.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested row was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Handle to the table store, cheap to clone.
#[derive(Clone, Debug)]
pub enum Database {
    /// Hosted `PostgreSQL`.
    Postgres(PgPool),
    /// In-process tables.
    Memory(Arc<MemoryTables>),
}

impl Database {
    /// A fresh, empty memory backend.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::new(MemoryTables::default()))
    }

    /// Check that the store answers queries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if `PostgreSQL` is unreachable.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
                Ok(())
            }
            Self::Memory(_) => Ok(()),
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-violation into `Conflict`, everything else into `Database`.
pub(crate) fn map_insert_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(db_err.message().to_string());
    }
    RepositoryError::Database(err)
}
