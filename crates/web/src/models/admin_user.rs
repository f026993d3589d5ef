//! Admin credential domain type.

use chrono::{DateTime, Utc};

use pin_gate_core::{AdminUserId, Email, StoredCredential};

use super::CurrentAdmin;

/// A row of the `admin_users` table (domain type).
#[derive(Debug, Clone)]
pub struct AdminCredential {
    /// Unique admin ID.
    pub id: AdminUserId,
    /// Lookup key at login.
    pub email: Email,
    /// Stored password (hash or legacy plaintext).
    pub password: StoredCredential,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
}

impl AdminCredential {
    /// The identity written to the session after a successful login.
    #[must_use]
    pub fn identity(&self) -> CurrentAdmin {
        CurrentAdmin {
            id: self.id,
            email: self.email.clone(),
        }
    }
}
