//! PIN record domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pin_gate_core::{PinCode, PinCodeId, PinStatus};

/// A row of the `pin_codes` table (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct PinRecord {
    /// Unique row ID.
    pub id: PinCodeId,
    /// The six-digit code.
    pub pin_code: PinCode,
    /// Soft-delete flag.
    pub status: PinStatus,
    /// Text shown to the user after a successful check.
    pub description: Option<String>,
    /// When the record was inserted.
    pub created_at: DateTime<Utc>,
}

impl PinRecord {
    /// Whether the record still passes verification.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Values supplied when inserting a PIN record.
///
/// `status` and `created_at` are filled by the store.
#[derive(Debug, Clone)]
pub struct NewPinRecord {
    pub pin_code: PinCode,
    pub description: Option<String>,
}

impl NewPinRecord {
    /// Build an insert, turning a blank description into `None`.
    #[must_use]
    pub fn new(pin_code: PinCode, description: Option<&str>) -> Self {
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_owned);
        Self {
            pin_code,
            description,
        }
    }
}
