//! Web configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PIN_GATE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`). Only required when `PIN_GATE_STORE=postgres`.
//!
//! ## Optional
//! - `PIN_GATE_STORE` - Table store backend: `postgres` (default) or `memory`
//! - `PIN_GATE_HOST` - Bind address (default: 127.0.0.1)
//! - `PIN_GATE_PORT` - Listen port (default: 3000)
//! - `PIN_GATE_BASE_URL` - Public URL (default: `http://localhost:3000`)
//! - `PIN_GATE_ADMIN_EMAIL` / `PIN_GATE_ADMIN_PASSWORD` - Bootstrap admin for
//!   the memory backend
//! - `PIN_GATE_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which table store backs the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Hosted `PostgreSQL` via `sqlx`.
    #[default]
    Postgres,
    /// Process-local tables; contents are lost on restart.
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store '{other}' (expected postgres or memory)")),
        }
    }
}

/// Bootstrap admin inserted into the memory backend at start-up.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: SecretString,
}

/// PIN Gate web configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Table store backend
    pub store: StoreKind,
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Admin created on start-up when running on the memory backend
    pub bootstrap_admin: Option<BootstrapAdmin>,
    /// Emit JSON formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store = parse_env_or_default("PIN_GATE_STORE", "postgres")?;
        let database_url = get_database_url("PIN_GATE_DATABASE_URL");
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("PIN_GATE_DATABASE_URL".to_string()));
        }

        let host = parse_env_or_default("PIN_GATE_HOST", "127.0.0.1")?;
        let port = parse_env_or_default("PIN_GATE_PORT", "3000")?;
        let base_url = get_optional_env("PIN_GATE_BASE_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_string());
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("PIN_GATE_BASE_URL".to_string(), e.to_string())
        })?;

        let bootstrap_admin = match (
            get_optional_env("PIN_GATE_ADMIN_EMAIL"),
            get_optional_env("PIN_GATE_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                email,
                password: SecretString::from(password),
            }),
            _ => None,
        };

        Ok(Self {
            store,
            database_url,
            host,
            port,
            base_url,
            bootstrap_admin,
            log_json: get_optional_env("PIN_GATE_LOG_JSON").is_some(),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (enables `Secure` cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Configuration for tests and local runs on the memory backend.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            store: StoreKind::Memory,
            database_url: None,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            bootstrap_admin: None,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Option<SecretString> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_optional_env(key).unwrap_or_else(|| default.to_string());
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
