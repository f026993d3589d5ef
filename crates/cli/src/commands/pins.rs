//! PIN record commands.
//!
//! # Usage
//!
//! ```bash
//! pin-cli pins add 123456 -d VIP
//! pin-cli pins list
//! pin-cli pins list --all
//! pin-cli pins deactivate <id>
//! ```
//!
//! The same validation as the admin dashboard applies: six digits, and no
//! duplicate of a currently active code.

use pin_gate_core::PinCodeId;
use pin_gate_web::db::PinCodeRepository;
use pin_gate_web::services::PinAdministration;

use super::{CommandError, connect};

/// Add an active PIN.
///
/// # Errors
///
/// Returns an error if the code is invalid, already active, or the insert
/// fails.
pub async fn add(code: &str, description: Option<&str>) -> Result<PinCodeId, CommandError> {
    let db = connect().await?;
    let pins = PinAdministration::new(&db);

    let loaded = pins.list_active().await?;
    let record = pins.add_pin(code, description, &loaded).await?;

    tracing::info!("PIN added! ID: {}", record.id);
    Ok(record.id)
}

/// List PINs, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list(include_inactive: bool) -> Result<(), CommandError> {
    let db = connect().await?;
    let repo = PinCodeRepository::new(&db);

    let records = if include_inactive {
        repo.list_all().await?
    } else {
        repo.list_active().await?
    };

    tracing::info!("{} PIN(s)", records.len());
    for record in records {
        tracing::info!(
            "  {}  {}  {:<8}  {}",
            record.id,
            record.pin_code,
            record.status.to_string(),
            record.description.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

/// Deactivate a PIN. The row is kept.
///
/// # Errors
///
/// Returns an error if the ID is malformed or unknown.
pub async fn deactivate(id: &str) -> Result<(), CommandError> {
    let id: PinCodeId = id.parse()?;

    let db = connect().await?;
    PinAdministration::new(&db).deactivate(id).await?;

    tracing::info!("PIN {} deactivated", id);
    Ok(())
}
