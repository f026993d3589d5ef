//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                               - Landing page
//!
//! # PIN check
//! GET  /pin                            - Keypad
//! POST /pin/digit                      - Append a digit
//! POST /pin/clear                      - Clear the entry
//! POST /pin/check                      - Check the entry
//!
//! # Admin session
//! GET  /admin/login                    - Login page
//! POST /admin/login                    - Login action
//! POST /admin/logout                   - Logout action
//!
//! # Admin dashboard (requires auth)
//! GET  /admin                          - Active PIN list
//! POST /admin/pins                     - Add a PIN
//! POST /admin/pins/{id}/deactivate     - Deactivate a PIN
//! POST /admin/visibility               - Show/hide codes
//! ```
//!
//! Every `POST` answers with a redirect; the outcome travels to the next page
//! as a [`Toast`] in the session.

pub mod admin;
pub mod auth;
pub mod home;
pub mod pin;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::models::{Toast, session_keys};
use crate::state::AppState;

/// Create the PIN check router.
pub fn pin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pin::keypad))
        .route("/digit", post(pin::push_digit))
        .route("/clear", post(pin::clear))
        .route("/check", post(pin::check))
}

/// Create the admin router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/pins", post(admin::add_pin))
        .route("/pins/{id}/deactivate", post(admin::deactivate_pin))
        .route("/visibility", post(admin::toggle_visibility))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/pin", pin_routes())
        .nest("/admin", admin_routes())
}

/// Queue a notification for the next rendered page.
///
/// A store failure loses the notification and is only logged.
pub async fn push_toast(session: &Session, toast: Toast) {
    if let Err(e) = session.insert(session_keys::TOAST, toast).await {
        tracing::warn!(error = %e, "Failed to store notification in session");
    }
}

/// Take the queued notification, if any.
pub async fn take_toast(session: &Session) -> Option<Toast> {
    match session.remove::<Toast>(session_keys::TOAST).await {
        Ok(toast) => toast,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read notification from session");
            None
        }
    }
}
