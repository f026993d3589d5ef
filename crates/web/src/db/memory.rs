//! Process-local table store.
//!
//! Mirrors the two `PostgreSQL` tables closely enough for tests and for local
//! runs without a database. Rows live only as long as the process.

use chrono::Utc;
use tokio::sync::RwLock;

use pin_gate_core::{AdminUserId, Email, PinCodeId, PinStatus, StoredCredential};

use super::RepositoryError;
use crate::models::{AdminCredential, NewPinRecord, PinRecord};

/// In-memory `admin_users` and `pin_codes` tables.
#[derive(Debug, Default)]
pub struct MemoryTables {
    pub(super) admin_users: RwLock<Vec<AdminCredential>>,
    pub(super) pin_codes: RwLock<Vec<PinRecord>>,
}

impl MemoryTables {
    /// Insert an admin row, rejecting a duplicate email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already present.
    pub async fn insert_admin(
        &self,
        email: Email,
        password: StoredCredential,
    ) -> Result<AdminCredential, RepositoryError> {
        let mut rows = self.admin_users.write().await;
        if rows.iter().any(|row| row.email == email) {
            return Err(RepositoryError::Conflict(format!(
                "admin_users.email already exists: {email}"
            )));
        }

        let admin = AdminCredential {
            id: AdminUserId::generate(),
            email,
            password,
            created_at: Utc::now(),
        };
        rows.push(admin.clone());
        Ok(admin)
    }

    /// Insert a PIN row. Duplicate codes are accepted, as in `PostgreSQL`.
    pub async fn insert_pin(&self, new: NewPinRecord) -> PinRecord {
        let record = PinRecord {
            id: PinCodeId::generate(),
            pin_code: new.pin_code,
            status: PinStatus::Active,
            description: new.description,
            created_at: Utc::now(),
        };
        self.pin_codes.write().await.push(record.clone());
        record
    }
}
