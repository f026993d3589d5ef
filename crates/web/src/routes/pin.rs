//! PIN keypad route handlers.
//!
//! The keypad is a set of small forms. Each press posts one digit, the
//! handler updates the [`PinEntry`] kept in the session and redirects back to
//! `GET /pin`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use pin_gate_core::PinCode;

use super::{push_toast, take_toast};
use crate::error::Result;
use crate::filters;
use crate::messages;
use crate::models::{CheckOutcome, PinEntry, Toast, session_keys};
use crate::services::{CheckError, PinVerifier};
use crate::state::AppState;

/// Keypad digits in display order.
const KEYS: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];

/// Digit form data.
#[derive(Debug, Deserialize)]
pub struct DigitForm {
    pub digit: String,
}

/// Keypad page template.
#[derive(Template, WebTemplate)]
#[template(path = "pin/keypad.html")]
pub struct KeypadTemplate {
    pub toast: Option<Toast>,
    /// CSS class per slot, one per digit position.
    pub slots: Vec<&'static str>,
    /// `success`, `failure` or empty.
    pub outcome: &'static str,
    pub description: Option<String>,
    pub can_check: bool,
    pub keys: &'static [&'static str],
}

impl KeypadTemplate {
    fn new(entry: &PinEntry, toast: Option<Toast>) -> Self {
        let filled_class = match entry.outcome() {
            Some(CheckOutcome::Success) => "slot filled success",
            Some(CheckOutcome::Failure) => "slot filled failure",
            None => "slot filled",
        };
        let slots = (0..PinCode::LENGTH)
            .map(|i| if i < entry.len() { filled_class } else { "slot" })
            .collect();

        Self {
            toast,
            slots,
            outcome: match entry.outcome() {
                Some(CheckOutcome::Success) => "success",
                Some(CheckOutcome::Failure) => "failure",
                None => "",
            },
            description: entry.description().map(str::to_owned),
            can_check: entry.can_check(),
            keys: &KEYS,
        }
    }
}

async fn load_entry(session: &Session) -> Result<PinEntry> {
    Ok(session
        .get::<PinEntry>(session_keys::PIN_ENTRY)
        .await?
        .unwrap_or_default())
}

async fn save_entry(session: &Session, entry: &PinEntry) -> Result<()> {
    session.insert(session_keys::PIN_ENTRY, entry).await?;
    Ok(())
}

/// Display the keypad.
///
/// GET /pin
pub async fn keypad(session: Session) -> Result<impl IntoResponse> {
    let entry = load_entry(&session).await?;
    let toast = take_toast(&session).await;
    Ok(KeypadTemplate::new(&entry, toast))
}

/// Append one digit.
///
/// POST /pin/digit
pub async fn push_digit(session: Session, Form(form): Form<DigitForm>) -> Result<Redirect> {
    let mut entry = load_entry(&session).await?;
    if entry.push_digit(&form.digit) {
        save_entry(&session, &entry).await?;
    }
    Ok(Redirect::to("/pin"))
}

/// Clear the entry.
///
/// POST /pin/clear
pub async fn clear(session: Session) -> Result<Redirect> {
    let mut entry = load_entry(&session).await?;
    entry.clear();
    save_entry(&session, &entry).await?;
    Ok(Redirect::to("/pin"))
}

/// Check the entry against active PIN records.
///
/// POST /pin/check
pub async fn check(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let mut entry = load_entry(&session).await?;

    let toast = match PinVerifier::new(state.db()).check(&mut entry).await {
        Ok(CheckOutcome::Success) => Toast::info(
            messages::SUCCESS_TITLE,
            entry.description().unwrap_or(messages::PIN_MATCH),
        ),
        Ok(CheckOutcome::Failure) => {
            Toast::error(messages::PIN_MISMATCH_TITLE, messages::PIN_MISMATCH)
        }
        Err(e) => {
            if let CheckError::Repository(ref err) = e {
                tracing::error!(error = %err, "PIN lookup failed");
            }
            Toast::error(messages::ERROR_TITLE, e.user_message())
        }
    };

    save_entry(&session, &entry).await?;
    push_toast(&session, toast).await;
    Ok(Redirect::to("/pin"))
}
