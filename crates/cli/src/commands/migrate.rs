//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! pin-cli migrate
//! ```
//!
//! Applies the table migrations from `crates/web/migrations/`, then creates
//! the `tower_sessions.session` table used by the session store.

use tower_sessions_sqlx_store::PostgresStore;

use pin_gate_web::db::MIGRATOR;

use super::{CommandError, connect_pool};

/// Run all migrations.
///
/// # Errors
///
/// Returns an error if the connection or any migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect_pool().await?;

    tracing::info!("Running table migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Running session store migration...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
