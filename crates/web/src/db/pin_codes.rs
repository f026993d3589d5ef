//! PIN code repository for database operations.
//!
//! Rows are soft-deleted: deactivation flips `is_active` and the row stays in
//! the table. Nothing in this module issues a `DELETE`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pin_gate_core::{PinCode, PinCodeId, PinStatus};

use super::{Database, RepositoryError, map_insert_error};
use crate::models::{NewPinRecord, PinRecord};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` PIN code queries.
#[derive(Debug, sqlx::FromRow)]
struct PinCodeRow {
    id: Uuid,
    pin_code: String,
    is_active: bool,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PinCodeRow> for PinRecord {
    type Error = RepositoryError;

    fn try_from(row: PinCodeRow) -> Result<Self, Self::Error> {
        let pin_code = PinCode::parse(&row.pin_code).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid pin_code in database: {e}"))
        })?;

        Ok(Self {
            id: PinCodeId::new(row.id),
            pin_code,
            status: PinStatus::from_is_active(row.is_active),
            description: row.description,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for `pin_codes` operations.
pub struct PinCodeRepository<'a> {
    db: &'a Database,
}

impl<'a> PinCodeRepository<'a> {
    /// Create a new PIN code repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Find the active record for a code.
    ///
    /// When duplicates exist, the newest active row wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_active_by_code(
        &self,
        code: &PinCode,
    ) -> Result<Option<PinRecord>, RepositoryError> {
        match self.db {
            Database::Postgres(pool) => {
                let row = sqlx::query_as::<_, PinCodeRow>(
                    r"
                    SELECT id, pin_code, is_active, description, created_at
                    FROM pin_codes
                    WHERE pin_code = $1 AND is_active = true
                    ORDER BY created_at DESC
                    LIMIT 1
                    ",
                )
                .bind(code.as_str())
                .fetch_optional(pool)
                .await?;

                row.map(TryInto::try_into).transpose()
            }
            Database::Memory(tables) => Ok(tables
                .pin_codes
                .read()
                .await
                .iter()
                .filter(|row| row.is_active() && &row.pin_code == code)
                .max_by_key(|row| row.created_at)
                .cloned()),
        }
    }

    /// List active records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_active(&self) -> Result<Vec<PinRecord>, RepositoryError> {
        self.list(true).await
    }

    /// List every record, including deactivated ones, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<PinRecord>, RepositoryError> {
        self.list(false).await
    }

    async fn list(&self, active_only: bool) -> Result<Vec<PinRecord>, RepositoryError> {
        match self.db {
            Database::Postgres(pool) => {
                let rows = sqlx::query_as::<_, PinCodeRow>(
                    r"
                    SELECT id, pin_code, is_active, description, created_at
                    FROM pin_codes
                    WHERE is_active = true OR NOT $1
                    ORDER BY created_at DESC
                    ",
                )
                .bind(active_only)
                .fetch_all(pool)
                .await?;

                rows.into_iter().map(TryInto::try_into).collect()
            }
            Database::Memory(tables) => {
                let mut rows: Vec<PinRecord> = tables
                    .pin_codes
                    .read()
                    .await
                    .iter()
                    .filter(|row| !active_only || row.is_active())
                    .cloned()
                    .collect();
                rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(rows)
            }
        }
    }

    /// Insert a new active record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a constraint violation.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, new: NewPinRecord) -> Result<PinRecord, RepositoryError> {
        match self.db {
            Database::Postgres(pool) => {
                let row = sqlx::query_as::<_, PinCodeRow>(
                    r"
                    INSERT INTO pin_codes (pin_code, description, is_active)
                    VALUES ($1, $2, true)
                    RETURNING id, pin_code, is_active, description, created_at
                    ",
                )
                .bind(new.pin_code.as_str())
                .bind(new.description.as_deref())
                .fetch_one(pool)
                .await
                .map_err(map_insert_error)?;

                row.try_into()
            }
            Database::Memory(tables) => Ok(tables.insert_pin(new).await),
        }
    }

    /// Set a record's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_status(
        &self,
        id: PinCodeId,
        status: PinStatus,
    ) -> Result<(), RepositoryError> {
        match self.db {
            Database::Postgres(pool) => {
                let result = sqlx::query(
                    r"
                    UPDATE pin_codes
                    SET is_active = $2
                    WHERE id = $1
                    ",
                )
                .bind(id.as_uuid())
                .bind(status.is_active())
                .execute(pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound);
                }
                Ok(())
            }
            Database::Memory(tables) => {
                let mut rows = tables.pin_codes.write().await;
                let row = rows
                    .iter_mut()
                    .find(|row| row.id == id)
                    .ok_or(RepositoryError::NotFound)?;
                row.status = status;
                Ok(())
            }
        }
    }

    /// Soft-delete a record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn deactivate(&self, id: PinCodeId) -> Result<(), RepositoryError> {
        self.set_status(id, PinStatus::Inactive).await
    }
}
