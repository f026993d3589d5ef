//! Admin dashboard route handlers.
//!
//! All handlers require a logged-in admin. Store failures never surface as
//! error pages here; they are logged and reported as a notification.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use pin_gate_core::PinCodeId;

use super::{push_toast, take_toast};
use crate::error::{AppError, Result};
use crate::filters;
use crate::messages;
use crate::middleware::RequireAdminAuth;
use crate::models::{PinRecord, Toast, session_keys};
use crate::services::{PinAdminError, PinAdministration};
use crate::state::AppState;

/// New PIN form data.
#[derive(Debug, Deserialize)]
pub struct NewPinForm {
    pub pin_code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One row of the PIN list.
pub struct PinRow {
    pub id: String,
    pub code: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl PinRow {
    fn new(record: &PinRecord, show_pins: bool) -> Self {
        Self {
            id: record.id.to_string(),
            code: if show_pins {
                record.pin_code.to_string()
            } else {
                record.pin_code.masked()
            },
            description: record.description.clone(),
            created_at: record.created_at.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub toast: Option<Toast>,
    pub admin_email: String,
    pub pins: Vec<PinRow>,
    pub active_count: usize,
    pub show_pins: bool,
    /// Set when the list could not be read; count and rows are then unknown.
    pub load_error: Option<&'static str>,
}

async fn show_pins(session: &Session) -> bool {
    session
        .get::<bool>(session_keys::SHOW_PINS)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Display the active PIN list.
///
/// GET /admin
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> impl IntoResponse {
    let mut toast = take_toast(&session).await;

    let records = match PinAdministration::new(state.db()).list_active().await {
        Ok(records) => Some(records),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load PIN list");
            // A pending outcome from the previous action stays visible.
            toast.get_or_insert_with(|| {
                Toast::error(messages::ERROR_TITLE, messages::PIN_LIST_FAILED)
            });
            None
        }
    };

    let show_pins = show_pins(&session).await;
    let records = records.as_deref();

    DashboardTemplate {
        toast,
        admin_email: admin.email.to_string(),
        active_count: records.map_or(0, <[PinRecord]>::len),
        pins: records
            .unwrap_or_default()
            .iter()
            .map(|r| PinRow::new(r, show_pins))
            .collect(),
        show_pins,
        load_error: records.is_none().then_some(messages::PIN_LIST_FAILED),
    }
}

/// Add a PIN.
///
/// POST /admin/pins
pub async fn add_pin(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Form(form): Form<NewPinForm>,
) -> Redirect {
    let pins = PinAdministration::new(state.db());

    let result = match pins.list_active().await {
        Ok(loaded) => pins.add_pin(&form.pin_code, form.description.as_deref(), &loaded).await,
        Err(e) => Err(e),
    };

    let toast = match result {
        Ok(_) => Toast::info(messages::SUCCESS_TITLE, messages::PIN_ADDED),
        Err(e) => {
            if let PinAdminError::Repository(ref err) = e {
                tracing::error!(error = %err, "Failed to add PIN");
            }
            Toast::error(messages::ERROR_TITLE, e.user_message(messages::PIN_ADD_FAILED))
        }
    };

    push_toast(&session, toast).await;
    Redirect::to("/admin")
}

/// Deactivate a PIN. The row stays in the table.
///
/// POST /admin/pins/{id}/deactivate
pub async fn deactivate_pin(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(raw_id): Path<String>,
) -> Result<Redirect> {
    let id: PinCodeId = raw_id
        .parse()
        .map_err(|_| AppError::BadRequest("invalid PIN id".to_string()))?;

    let toast = match PinAdministration::new(state.db()).deactivate(id).await {
        Ok(()) => Toast::info(messages::SUCCESS_TITLE, messages::PIN_DEACTIVATED),
        Err(e) => {
            tracing::error!(error = %e, pin_id = %id, "Failed to deactivate PIN");
            Toast::error(
                messages::ERROR_TITLE,
                e.user_message(messages::PIN_DEACTIVATE_FAILED),
            )
        }
    };

    push_toast(&session, toast).await;
    Ok(Redirect::to("/admin"))
}

/// Flip between masked and plain codes.
///
/// POST /admin/visibility
pub async fn toggle_visibility(
    session: Session,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<Redirect> {
    let current = show_pins(&session).await;
    session.insert(session_keys::SHOW_PINS, !current).await?;
    Ok(Redirect::to("/admin"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pin_gate_core::{PinCode, PinStatus};

    use super::*;

    fn record() -> PinRecord {
        PinRecord {
            id: PinCodeId::generate(),
            pin_code: PinCode::parse("123456").unwrap(),
            status: PinStatus::Active,
            description: Some("VIP".to_owned()),
            created_at: Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 0).unwrap(),
        }
    }

    fn page(load_error: Option<&'static str>) -> String {
        DashboardTemplate {
            toast: None,
            admin_email: "admin@system.com".to_owned(),
            pins: Vec::new(),
            active_count: 0,
            show_pins: false,
            load_error,
        }
        .render()
        .unwrap()
    }

    #[test]
    fn test_empty_list_renders_zero_count() {
        let html = page(None);
        assert!(html.contains(r#"<span class="pin-count">0</span>"#));
        assert!(html.contains(r#"class="muted empty""#));
        assert!(!html.contains("load-error"));
    }

    #[test]
    fn test_unreadable_list_hides_count_and_empty_text() {
        let html = page(Some(messages::PIN_LIST_FAILED));
        assert!(html.contains(messages::PIN_LIST_FAILED));
        assert!(!html.contains("pin-count"));
        assert!(!html.contains(r#"class="muted empty""#));
    }

    #[test]
    fn test_row_masks_code_when_hidden() {
        let row = PinRow::new(&record(), false);
        assert_eq!(row.code, "••••••");
        assert_eq!(row.created_at, "09/03/2025 14:05");

        let row = PinRow::new(&record(), true);
        assert_eq!(row.code, "123456");
    }
}
