//! CLI command implementations.
//!
//! Every command talks to `PostgreSQL` directly through the web crate's
//! repositories; none of them need the server to be running.

pub mod admin;
pub mod migrate;
pub mod pins;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use pin_gate_web::db::{self, Database, RepositoryError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] pin_gate_core::EmailError),

    /// Password could not be hashed.
    #[error("{0}")]
    Credential(#[from] pin_gate_core::CredentialError),

    /// PIN rejected by validation.
    #[error("{0}")]
    Pin(#[from] pin_gate_web::services::PinAdminError),

    /// Malformed record ID.
    #[error("Invalid ID: {0}")]
    InvalidId(#[from] uuid::Error),

    /// Seed file could not be read.
    #[error("Cannot read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not valid YAML for the expected shape.
    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Connect to the database named by `PIN_GATE_DATABASE_URL` or `DATABASE_URL`.
///
/// # Errors
///
/// Returns `CommandError::MissingEnvVar` if neither variable is set, or
/// `CommandError::Database` if the connection fails.
pub async fn connect_pool() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("PIN_GATE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("PIN_GATE_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}

/// [`connect_pool`], wrapped as a table store handle.
///
/// # Errors
///
/// Same as [`connect_pool`].
pub async fn connect() -> Result<Database, CommandError> {
    Ok(Database::Postgres(connect_pool().await?))
}

/// Take the password from the flag or from `PIN_GATE_ADMIN_PASSWORD`.
fn resolve_password(password: Option<String>) -> Result<String, CommandError> {
    password
        .or_else(|| std::env::var("PIN_GATE_ADMIN_PASSWORD").ok())
        .ok_or(CommandError::MissingEnvVar("PIN_GATE_ADMIN_PASSWORD"))
}
