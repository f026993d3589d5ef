//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use pin_gate_core::{AdminUserId, Email};

/// Session-stored admin identity.
///
/// Serialized as `{"id": "<uuid>", "email": "<email>"}`. Any parseable value
/// under [`keys::ADMIN_USER`] counts as logged in; it is never re-checked
/// against the `admin_users` table and never expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's row ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: Email,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const ADMIN_USER: &str = "admin_user";

    /// Key for the PIN keypad state.
    pub const PIN_ENTRY: &str = "pin_entry";

    /// Key for the admin list's show/hide codes flag.
    pub const SHOW_PINS: &str = "show_pins";

    /// Key for the one-shot notification shown on the next page.
    pub const TOAST: &str = "toast";
}
