//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! pin-cli admin create -e admin@system.com -p 'correct horse'
//! pin-cli admin set-password -e admin@system.com -p 'battery staple'
//! pin-cli admin list
//! ```

use pin_gate_core::{AdminUserId, Email, StoredCredential};
use pin_gate_web::db::{AdminUserRepository, Database};

use super::{CommandError, connect, resolve_password};

/// Create a new admin user.
///
/// # Errors
///
/// Returns an error if the email is invalid, no password is given, or the
/// email already exists.
pub async fn create_user(
    email: &str,
    password: Option<String>,
) -> Result<AdminUserId, CommandError> {
    let email = Email::parse(email)?;
    let credential = StoredCredential::hash(&resolve_password(password)?)?;

    let db = connect().await?;
    let id = insert_admin(&db, &email, &credential).await?;

    tracing::info!("Admin user created successfully! ID: {}, Email: {}", id, email);
    Ok(id)
}

/// Insert one admin row.
pub(super) async fn insert_admin(
    db: &Database,
    email: &Email,
    credential: &StoredCredential,
) -> Result<AdminUserId, CommandError> {
    let admin = AdminUserRepository::new(db).create(email, credential).await?;
    Ok(admin.id)
}

/// Replace an admin's password with a fresh Argon2 hash.
///
/// Also the way to upgrade a row that still holds a plain password.
///
/// # Errors
///
/// Returns an error if the email is invalid, no password is given, or no
/// admin has this email.
pub async fn set_password(email: &str, password: Option<String>) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let credential = StoredCredential::hash(&resolve_password(password)?)?;

    let db = connect().await?;
    AdminUserRepository::new(&db)
        .set_password(&email, &credential)
        .await?;

    tracing::info!("Password updated for {}", email);
    Ok(())
}

/// List admin users.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list_users() -> Result<(), CommandError> {
    let db = connect().await?;
    let admins = AdminUserRepository::new(&db).list_all().await?;

    tracing::info!("{} admin user(s)", admins.len());
    for admin in admins {
        let storage = if admin.password.is_hashed() {
            "argon2"
        } else {
            "plaintext"
        };
        tracing::info!(
            "  {}  {}  password: {}  created {}",
            admin.id,
            admin.email,
            storage,
            admin.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}
