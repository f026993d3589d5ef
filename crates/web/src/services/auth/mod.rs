//! Admin authentication service.
//!
//! Email + password login against the `admin_users` table. A successful login
//! writes a [`CurrentAdmin`] into the session; from then on the session value
//! alone decides whether the browser is logged in.

mod error;

pub use error::AuthError;

use tower_sessions::Session;

use pin_gate_core::Email;

use crate::db::{AdminUserRepository, Database};
use crate::middleware::auth::{clear_current_admin, get_current_admin, set_current_admin};
use crate::middleware::session::{admin_expiry, visitor_expiry};
use crate::models::CurrentAdmin;

/// Admin authentication service for one request's session.
pub struct AdminAuthManager<'a> {
    users: AdminUserRepository<'a>,
    session: &'a Session,
}

impl<'a> AdminAuthManager<'a> {
    /// Create a new auth manager.
    #[must_use]
    pub const fn new(db: &'a Database, session: &'a Session) -> Self {
        Self {
            users: AdminUserRepository::new(db),
            session,
        }
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unparseable email, an
    /// unknown email or a wrong password. Returns `AuthError::Repository` or
    /// `AuthError::Session` if a store fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentAdmin, AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let admin = self
            .users
            .verify_credential(&email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let identity = admin.identity();
        // Fresh ID so a session planted before login is not promoted.
        self.session.cycle_id().await?;
        self.session.set_expiry(Some(admin_expiry()));
        set_current_admin(self.session, &identity).await?;

        tracing::info!(admin_id = %identity.id, "Admin logged in");
        Ok(identity)
    }

    /// Forget the logged-in admin. Never fails; store errors are logged.
    pub async fn logout(&self) {
        if let Err(e) = clear_current_admin(self.session).await {
            tracing::warn!(error = %e, "Failed to clear admin from session");
        }
        self.session.set_expiry(Some(visitor_expiry()));
    }

    /// The admin stored in the session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the session store cannot be read.
    pub async fn current(&self) -> Result<Option<CurrentAdmin>, AuthError> {
        Ok(get_current_admin(self.session).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pin_gate_core::StoredCredential;
    use tower_sessions::{Expiry, MemoryStore, SessionStore};

    use super::*;

    async fn setup() -> (Database, Session) {
        let db = Database::memory();
        AdminUserRepository::new(&db)
            .create(
                &Email::parse("admin@system.com").unwrap(),
                &StoredCredential::hash("correct").unwrap(),
            )
            .await
            .unwrap();
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        (db, session)
    }

    #[tokio::test]
    async fn test_login_stores_identity() {
        let (db, session) = setup().await;
        let auth = AdminAuthManager::new(&db, &session);

        let admin = auth.login("admin@system.com", "correct").await.unwrap();
        assert_eq!(admin.email.as_str(), "admin@system.com");
        assert_eq!(auth.current().await.unwrap(), Some(admin));
    }

    #[tokio::test]
    async fn test_login_rotates_session_id() {
        let (db, _) = setup().await;
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store.clone(), None);
        session.insert("planted", true).await.unwrap();
        session.save().await.unwrap();
        let planted_id = session.id().unwrap();

        AdminAuthManager::new(&db, &session)
            .login("admin@system.com", "correct")
            .await
            .unwrap();
        session.save().await.unwrap();

        let new_id = session.id().unwrap();
        assert_ne!(new_id, planted_id);
        assert!(store.load(&planted_id).await.unwrap().is_none());
        assert!(matches!(
            session.expiry(),
            Some(Expiry::OnInactivity(d)) if d.whole_days() == 400
        ));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_session_id() {
        let (db, session) = setup().await;
        session.insert("keypad", 1).await.unwrap();
        session.save().await.unwrap();
        let id = session.id();

        let _ = AdminAuthManager::new(&db, &session)
            .login("admin@system.com", "wrong")
            .await;
        assert_eq!(session.id(), id);
    }

    #[tokio::test]
    async fn test_mismatches_share_one_message() {
        let (db, session) = setup().await;
        let auth = AdminAuthManager::new(&db, &session);

        let wrong_password = auth.login("admin@system.com", "nope").await.unwrap_err();
        let unknown_email = auth.login("ghost@system.com", "correct").await.unwrap_err();
        let bad_email = auth.login("not-an-email", "correct").await.unwrap_err();

        for err in [&wrong_password, &unknown_email, &bad_email] {
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
        assert_eq!(wrong_password.user_message(), unknown_email.user_message());
        assert!(auth.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_identity() {
        let (db, session) = setup().await;
        let auth = AdminAuthManager::new(&db, &session);

        auth.login("admin@system.com", "correct").await.unwrap();
        auth.logout().await;
        assert!(auth.current().await.unwrap().is_none());
        assert!(matches!(
            session.expiry(),
            Some(Expiry::OnInactivity(d)) if d.whole_days() == 1
        ));

        // Logging out twice is harmless.
        auth.logout().await;
    }
}
