//! Authentication extractors and session helpers for the admin area.
//!
//! The guard trusts whatever identity the session holds. It never re-reads
//! `admin_users` and never expires a login.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::filters;
use crate::messages;
use crate::models::{CurrentAdmin, session_keys};

/// Where unauthenticated page requests are sent.
pub const LOGIN_PATH: &str = "/admin/login";

/// Result of reading the admin identity from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// The session store could not be read; nothing is known yet.
    Loading,
    /// A parseable identity is stored.
    Authenticated(CurrentAdmin),
    /// No identity, or one that no longer parses.
    Unauthenticated,
}

impl GuardState {
    /// Resolve the state for `session`.
    pub async fn resolve(session: &Session) -> Self {
        match get_current_admin(session).await {
            Ok(Some(admin)) => Self::Authenticated(admin),
            Ok(None) => Self::Unauthenticated,
            Err(e) => {
                tracing::warn!(error = %e, "Session store unavailable, guard stays loading");
                Self::Loading
            }
        }
    }
}

/// Placeholder page that reloads itself until the session can be read.
#[derive(Template, WebTemplate)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub message: &'static str,
    pub refresh_seconds: u32,
}

impl Default for LoadingTemplate {
    fn default() -> Self {
        Self {
            message: messages::LOADING,
            refresh_seconds: 2,
        }
    }
}

/// Extractor that requires admin authentication.
///
/// A missing identity redirects to [`LOGIN_PATH`]. An unreadable session store
/// renders the loading placeholder.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireAdminAuth(admin): RequireAdminAuth) -> impl IntoResponse {
///     format!("Hello, {}!", admin.email)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but not present.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// Session store unavailable.
    Loading,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Loading => (
                StatusCode::SERVICE_UNAVAILABLE,
                LoadingTemplate::default(),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let Some(session) = parts.extensions.get::<Session>() else {
            return Err(AdminAuthRejection::Loading);
        };

        match GuardState::resolve(session).await {
            GuardState::Authenticated(admin) => Ok(Self(admin)),
            GuardState::Unauthenticated => Err(AdminAuthRejection::RedirectToLogin),
            GuardState::Loading => Err(AdminAuthRejection::Loading),
        }
    }
}

/// Extractor that optionally gets the current admin.
///
/// Store failures read as "not logged in".
pub struct OptionalAdminAuth(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdminAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = match parts.extensions.get::<Session>() {
            Some(session) => get_current_admin(session).await.ok().flatten(),
            None => None,
        };

        Ok(Self(admin))
    }
}

/// Read the stored admin.
///
/// A value that no longer deserializes counts as absent.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn get_current_admin(
    session: &Session,
) -> Result<Option<CurrentAdmin>, tower_sessions::session::Error> {
    match session.get::<CurrentAdmin>(session_keys::ADMIN_USER).await {
        Ok(admin) => Ok(admin),
        Err(tower_sessions::session::Error::SerdeJson(e)) => {
            tracing::debug!(error = %e, "Ignoring unparseable admin identity in session");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ADMIN_USER, admin).await
}

/// Helper to clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove_value(session_keys::ADMIN_USER).await?;
    Ok(())
}
