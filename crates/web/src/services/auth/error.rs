//! Admin authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::messages;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email, wrong password, or an email that does not parse.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Session store error.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl AuthError {
    /// Text shown on the login page.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => messages::LOGIN_INVALID,
            Self::Repository(_) | Self::Session(_) => messages::LOGIN_FAILED,
        }
    }
}
