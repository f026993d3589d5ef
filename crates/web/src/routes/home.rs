//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;

use super::take_toast;
use crate::filters;
use crate::middleware::OptionalAdminAuth;
use crate::models::Toast;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub toast: Option<Toast>,
    pub admin_email: Option<String>,
}

/// Display the landing page.
///
/// GET /
pub async fn home(
    session: Session,
    OptionalAdminAuth(admin): OptionalAdminAuth,
) -> impl IntoResponse {
    HomeTemplate {
        toast: take_toast(&session).await,
        admin_email: admin.map(|a| a.email.to_string()),
    }
}
