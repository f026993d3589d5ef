//! Session middleware configuration.
//!
//! Sessions hold the logged-in admin, the keypad state and one-shot
//! notifications. The cookie is `HttpOnly` and `SameSite=Strict`, and `Secure`
//! when the site is served over https.
//!
//! Visitor sessions (keypad state, notifications) lapse after a day without
//! requests. Logging in switches the session to the browser cookie cap, so a
//! stored admin stays logged in until logout. Expired rows in the Postgres
//! store are removed by the deletion task started in `main`.

use async_trait::async_trait;
use tower_sessions::{
    Expiry, MemoryStore, SessionManagerLayer, SessionStore,
    session::{Id, Record},
    session_store,
};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::WebConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "pin_gate_session";

/// Browsers cap cookie lifetime at 400 days.
const ADMIN_INACTIVITY_DAYS: i64 = 400;

/// Lifetime of a session without an admin identity.
const VISITOR_INACTIVITY_DAYS: i64 = 1;

/// Expiry for sessions that carry an admin identity.
#[must_use]
pub fn admin_expiry() -> Expiry {
    Expiry::OnInactivity(tower_sessions::cookie::time::Duration::days(
        ADMIN_INACTIVITY_DAYS,
    ))
}

/// Expiry for anonymous sessions; the layer default.
#[must_use]
pub fn visitor_expiry() -> Expiry {
    Expiry::OnInactivity(tower_sessions::cookie::time::Duration::days(
        VISITOR_INACTIVITY_DAYS,
    ))
}

/// Session store matching the table store backend.
#[derive(Debug, Clone)]
pub enum AdminSessionStore {
    /// `tower_sessions.session` table in `PostgreSQL`.
    Postgres(PostgresStore),
    /// Process-local.
    Memory(MemoryStore),
}

impl AdminSessionStore {
    /// Empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }
}

#[async_trait]
impl SessionStore for AdminSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        match self {
            Self::Postgres(store) => store.create(record).await,
            Self::Memory(store) => store.create(record).await,
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        match self {
            Self::Postgres(store) => store.save(record).await,
            Self::Memory(store) => store.save(record).await,
        }
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        match self {
            Self::Postgres(store) => store.load(session_id).await,
            Self::Memory(store) => store.load(session_id).await,
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        match self {
            Self::Postgres(store) => store.delete(session_id).await,
            Self::Memory(store) => store.delete(session_id).await,
        }
    }
}

/// Create the session layer over `store`.
///
/// Generic so tests can substitute their own store.
#[must_use]
pub fn create_session_layer<S>(store: S, config: &WebConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(visitor_expiry())
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
