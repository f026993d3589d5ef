//! Admin login and logout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use super::{push_toast, take_toast};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::messages;
use crate::middleware::{LOGIN_PATH, OptionalAdminAuth};
use crate::models::Toast;
use crate::services::{AdminAuthManager, AuthError};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub toast: Option<Toast>,
    pub error: Option<&'static str>,
}

/// Query value for a credential mismatch.
const ERROR_INVALID: &str = "invalid";
/// Query value for a store failure.
const ERROR_FAILED: &str = "failed";

/// Map the `?error=` value to the message shown above the form.
fn error_message(code: Option<&str>) -> Option<&'static str> {
    match code? {
        ERROR_INVALID => Some(messages::LOGIN_INVALID),
        ERROR_FAILED => Some(messages::LOGIN_FAILED),
        _ => None,
    }
}

/// Display the login page, or go straight to the dashboard when logged in.
///
/// GET /admin/login
pub async fn login_page(
    session: Session,
    OptionalAdminAuth(admin): OptionalAdminAuth,
    Query(query): Query<LoginQuery>,
) -> Response {
    if admin.is_some() {
        return Redirect::to("/admin").into_response();
    }

    LoginTemplate {
        toast: take_toast(&session).await,
        error: error_message(query.error.as_deref()),
    }
    .into_response()
}

/// Handle login form submission.
///
/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Redirect {
    let auth = AdminAuthManager::new(state.db(), &session);

    match auth.login(&form.email, &form.password).await {
        Ok(admin) => {
            set_sentry_user(&admin.id, admin.email.as_str());
            push_toast(
                &session,
                Toast::info(messages::LOGIN_TITLE, messages::LOGIN_WELCOME),
            )
            .await;
            Redirect::to("/admin")
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Admin login rejected");
            Redirect::to(&format!("{LOGIN_PATH}?error={ERROR_INVALID}"))
        }
        Err(e) => {
            tracing::error!(error = %e, "Admin login failed");
            Redirect::to(&format!("{LOGIN_PATH}?error={ERROR_FAILED}"))
        }
    }
}

/// Logout and clear the admin from the session.
///
/// POST /admin/logout
pub async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    AdminAuthManager::new(state.db(), &session).logout().await;
    clear_sentry_user();
    push_toast(
        &session,
        Toast::info(messages::LOGOUT_TITLE, messages::LOGOUT_THANKS),
    )
    .await;
    Redirect::to(LOGIN_PATH)
}
