//! PIN Gate web server.
//!
//! # Architecture
//!
//! - Axum web framework, plain HTML forms, no client-side scripts
//! - Askama templates for server-side rendering
//! - `PostgreSQL` (or process-local tables) for `admin_users` and `pin_codes`
//! - tower-sessions for the admin login, keypad state and notifications

#![cfg_attr(not(test), forbid(unsafe_code))]

use pin_gate_core::{Email, StoredCredential};
use pin_gate_web::config::{StoreKind, WebConfig};
use pin_gate_web::db::{self, AdminUserRepository, Database};
use pin_gate_web::middleware::{AdminSessionStore, create_session_layer};
use pin_gate_web::state::AppState;
use secrecy::ExposeSecret;
use sentry::integrations::tracing as sentry_tracing;
use tokio::task::JoinHandle;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &WebConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// How often expired rows are purged from the session table.
const EXPIRED_SESSION_SWEEP: std::time::Duration = std::time::Duration::from_secs(60 * 60);

/// Periodically delete expired sessions from `PostgreSQL`.
fn spawn_session_cleanup(store: PostgresStore) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = store.continuously_delete_expired(EXPIRED_SESSION_SWEEP).await {
            tracing::error!(error = %e, "Expired session cleanup stopped");
        }
    })
}

/// Insert the configured bootstrap admin into the memory backend.
async fn bootstrap_admin(config: &WebConfig, db: &Database) {
    let Some(admin) = &config.bootstrap_admin else {
        tracing::warn!("Memory store without PIN_GATE_ADMIN_EMAIL/PASSWORD: no admin can log in");
        return;
    };

    let email = match Email::parse(&admin.email) {
        Ok(email) => email,
        Err(e) => {
            tracing::error!(error = %e, "Invalid PIN_GATE_ADMIN_EMAIL, skipping bootstrap admin");
            return;
        }
    };
    let credential = match StoredCredential::hash(admin.password.expose_secret()) {
        Ok(credential) => credential,
        Err(e) => {
            tracing::error!(error = %e, "Invalid PIN_GATE_ADMIN_PASSWORD, skipping bootstrap admin");
            return;
        }
    };

    match AdminUserRepository::new(db).create(&email, &credential).await {
        Ok(created) => tracing::info!(admin_id = %created.id, "Bootstrap admin created"),
        Err(e) => tracing::error!(error = %e, "Failed to create bootstrap admin"),
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = WebConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pin_gate_web=info,tower_http=debug".into());

    let fmt_layer = if config.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p pin-gate-cli -- migrate
    let (db, session_store, session_cleanup) = match config.store {
        StoreKind::Postgres => {
            let url = config
                .database_url
                .as_ref()
                .expect("PIN_GATE_DATABASE_URL checked by config");
            let pool = db::create_pool(url)
                .await
                .expect("Failed to create database pool");
            tracing::info!("Database pool created");
            let store = PostgresStore::new(pool.clone());
            let cleanup = spawn_session_cleanup(store.clone());
            (
                Database::Postgres(pool),
                AdminSessionStore::Postgres(store),
                Some(cleanup),
            )
        }
        StoreKind::Memory => {
            tracing::warn!(
                "Using the in-memory store; all data is lost on restart and sessions are never purged"
            );
            let db = Database::memory();
            bootstrap_admin(&config, &db).await;
            (db, AdminSessionStore::memory(), None)
        }
    };

    let session_layer = create_session_layer(session_store, &config);
    let state = AppState::new(db);
    let app = pin_gate_web::app(state, session_layer);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("pin-gate listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    if let Some(cleanup) = session_cleanup {
        cleanup.abort();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
