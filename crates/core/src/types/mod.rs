//! Core types for PIN Gate.
//!
//! This module provides type-safe wrappers for the domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod pin;
pub mod status;

pub use credential::{CredentialError, StoredCredential};
pub use email::{Email, EmailError};
pub use id::*;
pub use pin::{PinCode, PinCodeError};
pub use status::PinStatus;
