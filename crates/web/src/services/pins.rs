//! PIN verification and administration.

use thiserror::Error;

use pin_gate_core::{PinCode, PinCodeError, PinCodeId};

use crate::db::{Database, PinCodeRepository, RepositoryError};
use crate::messages;
use crate::models::{CheckOutcome, NewPinRecord, PinEntry, PinRecord};

// =============================================================================
// Verification
// =============================================================================

/// Why a check produced no outcome from the store.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Fewer than six digits entered; the store was not consulted.
    #[error("PIN entry is incomplete")]
    Incomplete,

    /// The lookup failed. The entry has been marked as failed.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CheckError {
    /// Text shown in the notification.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Incomplete => messages::PIN_INCOMPLETE,
            Self::Repository(_) => messages::PIN_CHECK_FAILED,
        }
    }
}

/// Checks keypad entries against active PIN records.
pub struct PinVerifier<'a> {
    pins: PinCodeRepository<'a>,
}

impl<'a> PinVerifier<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            pins: PinCodeRepository::new(db),
        }
    }

    /// Check the entry and record the outcome on it.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::Incomplete` without touching the store or the
    /// entry when fewer than six digits are in. Returns
    /// `CheckError::Repository` after marking the entry failed when the lookup
    /// errors.
    pub async fn check(&self, entry: &mut PinEntry) -> Result<CheckOutcome, CheckError> {
        let code = entry.code().ok_or(CheckError::Incomplete)?;

        match self.pins.find_active_by_code(&code).await {
            Ok(Some(record)) => {
                entry.succeed(record.description);
                Ok(CheckOutcome::Success)
            }
            Ok(None) => {
                entry.fail();
                Ok(CheckOutcome::Failure)
            }
            Err(e) => {
                entry.fail();
                Err(e.into())
            }
        }
    }
}

// =============================================================================
// Administration
// =============================================================================

/// Errors from the admin PIN operations.
#[derive(Debug, Error)]
pub enum PinAdminError {
    /// Candidate is not six digits.
    #[error("invalid PIN: {0}")]
    InvalidPin(#[from] PinCodeError),

    /// Candidate is already on the loaded active list.
    #[error("PIN already exists")]
    Duplicate,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl PinAdminError {
    /// Text shown in the notification.
    ///
    /// Store failures get `fallback`, the generic message for the operation.
    #[must_use]
    pub const fn user_message(&self, fallback: &'static str) -> &'static str {
        match self {
            Self::InvalidPin(PinCodeError::Length { .. }) => messages::PIN_LENGTH,
            Self::InvalidPin(PinCodeError::NonDigit) => messages::PIN_DIGITS_ONLY,
            Self::Duplicate => messages::PIN_DUPLICATE,
            Self::Repository(_) => fallback,
        }
    }
}

/// Admin-side PIN management.
pub struct PinAdministration<'a> {
    pins: PinCodeRepository<'a>,
}

impl<'a> PinAdministration<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            pins: PinCodeRepository::new(db),
        }
    }

    /// Active records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PinAdminError::Repository` if the store fails.
    pub async fn list_active(&self) -> Result<Vec<PinRecord>, PinAdminError> {
        Ok(self.pins.list_active().await?)
    }

    /// Validate and insert a new active record.
    ///
    /// `loaded` is the active list the admin is looking at. The duplicate
    /// check runs against it only, so two admins racing can still insert the
    /// same code.
    ///
    /// # Errors
    ///
    /// Returns `PinAdminError::InvalidPin` or `PinAdminError::Duplicate`
    /// before any store call, or `PinAdminError::Repository` if the insert
    /// fails.
    pub async fn add_pin(
        &self,
        candidate: &str,
        description: Option<&str>,
        loaded: &[PinRecord],
    ) -> Result<PinRecord, PinAdminError> {
        let pin_code = PinCode::parse(candidate)?;

        if loaded
            .iter()
            .any(|record| record.is_active() && record.pin_code == pin_code)
        {
            return Err(PinAdminError::Duplicate);
        }

        let record = self
            .pins
            .insert(NewPinRecord::new(pin_code, description))
            .await?;

        tracing::info!(pin_id = %record.id, "PIN added");
        Ok(record)
    }

    /// Soft-delete a record.
    ///
    /// # Errors
    ///
    /// Returns `PinAdminError::Repository` wrapping `NotFound` for an unknown
    /// ID, or any other store failure.
    pub async fn deactivate(&self, id: PinCodeId) -> Result<(), PinAdminError> {
        self.pins.deactivate(id).await?;
        tracing::info!(pin_id = %id, "PIN deactivated");
        Ok(())
    }
}
