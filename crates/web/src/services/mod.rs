//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Admin login/logout against `admin_users` and the session
//! - `pins` - PIN verification and PIN administration

pub mod auth;
pub mod pins;

pub use auth::{AdminAuthManager, AuthError};
pub use pins::{CheckError, PinAdminError, PinAdministration, PinVerifier};
