//! Admin user repository for database operations.
//!
//! Lookups are by email; the stored credential is checked in-process so that
//! both hashed and legacy plaintext rows verify.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pin_gate_core::{AdminUserId, Email, StoredCredential};

use super::{Database, RepositoryError, map_insert_error};
use crate::models::AdminCredential;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` admin user queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminUserRow> for AdminCredential {
    type Error = RepositoryError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: AdminUserId::new(row.id),
            email,
            password: StoredCredential::from_stored(row.password_hash),
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for `admin_users` operations.
pub struct AdminUserRepository<'a> {
    db: &'a Database,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new admin user repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all admin users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<AdminCredential>, RepositoryError> {
        match self.db {
            Database::Postgres(pool) => {
                let rows = sqlx::query_as::<_, AdminUserRow>(
                    r"
                    SELECT id, email, password_hash, created_at
                    FROM admin_users
                    ORDER BY created_at DESC
                    ",
                )
                .fetch_all(pool)
                .await?;

                rows.into_iter().map(TryInto::try_into).collect()
            }
            Database::Memory(tables) => {
                let mut rows = tables.admin_users.read().await.clone();
                rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(rows)
            }
        }
    }

    /// Get an admin user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<AdminCredential>, RepositoryError> {
        match self.db {
            Database::Postgres(pool) => {
                let row = sqlx::query_as::<_, AdminUserRow>(
                    r"
                    SELECT id, email, password_hash, created_at
                    FROM admin_users
                    WHERE email = $1
                    ",
                )
                .bind(email.as_str())
                .fetch_optional(pool)
                .await?;

                row.map(TryInto::try_into).transpose()
            }
            Database::Memory(tables) => Ok(tables
                .admin_users
                .read()
                .await
                .iter()
                .find(|row| &row.email == email)
                .cloned()),
        }
    }

    /// Look up an admin whose email and password both match.
    ///
    /// Returns `None` for an unknown email and for a wrong password alike.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn verify_credential(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<Option<AdminCredential>, RepositoryError> {
        let admin = self.get_by_email(email).await?;
        Ok(admin.filter(|admin| admin.password.verify(password)))
    }

    /// Create a new admin user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password: &StoredCredential,
    ) -> Result<AdminCredential, RepositoryError> {
        match self.db {
            Database::Postgres(pool) => {
                let row = sqlx::query_as::<_, AdminUserRow>(
                    r"
                    INSERT INTO admin_users (email, password_hash)
                    VALUES ($1, $2)
                    RETURNING id, email, password_hash, created_at
                    ",
                )
                .bind(email.as_str())
                .bind(password.expose())
                .fetch_one(pool)
                .await
                .map_err(map_insert_error)?;

                row.try_into()
            }
            Database::Memory(tables) => {
                tables
                    .insert_admin(email.clone(), password.clone())
                    .await
            }
        }
    }

    /// Replace an admin's stored password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no admin has this email.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_password(
        &self,
        email: &Email,
        password: &StoredCredential,
    ) -> Result<(), RepositoryError> {
        match self.db {
            Database::Postgres(pool) => {
                let result = sqlx::query(
                    r"
                    UPDATE admin_users
                    SET password_hash = $2
                    WHERE email = $1
                    ",
                )
                .bind(email.as_str())
                .bind(password.expose())
                .execute(pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound);
                }
                Ok(())
            }
            Database::Memory(tables) => {
                let mut rows = tables.admin_users.write().await;
                let admin = rows
                    .iter_mut()
                    .find(|row| &row.email == email)
                    .ok_or(RepositoryError::NotFound)?;
                admin.password = password.clone();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_verify_credential_plaintext_and_hashed() {
        let db = Database::memory();
        let repo = AdminUserRepository::new(&db);

        repo.create(
            &email("legacy@system.com"),
            &StoredCredential::from_stored("admin1234".to_owned()),
        )
        .await
        .unwrap();
        repo.create(
            &email("admin@system.com"),
            &StoredCredential::hash("s3cret").unwrap(),
        )
        .await
        .unwrap();

        assert!(
            repo.verify_credential(&email("legacy@system.com"), "admin1234")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            repo.verify_credential(&email("admin@system.com"), "s3cret")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            repo.verify_credential(&email("admin@system.com"), "wrong")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            repo.verify_credential(&email("nobody@system.com"), "s3cret")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let db = Database::memory();
        let repo = AdminUserRepository::new(&db);
        let password = StoredCredential::from_stored("pw".to_owned());

        repo.create(&email("a@b.com"), &password).await.unwrap();
        let err = repo.create(&email("a@b.com"), &password).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_set_password() {
        let db = Database::memory();
        let repo = AdminUserRepository::new(&db);
        let address = email("a@b.com");

        repo.create(&address, &StoredCredential::from_stored("old".to_owned()))
            .await
            .unwrap();
        repo.set_password(&address, &StoredCredential::hash("new").unwrap())
            .await
            .unwrap();

        assert!(repo.verify_credential(&address, "old").await.unwrap().is_none());
        assert!(repo.verify_credential(&address, "new").await.unwrap().is_some());

        let missing = repo
            .set_password(&email("x@y.com"), &StoredCredential::from_stored("p".to_owned()))
            .await;
        assert!(matches!(missing, Err(RepositoryError::NotFound)));
    }
}
