//! Domain models for PIN Gate.
//!
//! Row-shaped domain types (`AdminCredential`, `PinRecord`) and the values kept
//! in a browser session (`CurrentAdmin`, `PinEntry`, `Toast`).

pub mod admin_user;
pub mod pin;
pub mod pin_entry;
pub mod session;
pub mod toast;

pub use admin_user::AdminCredential;
pub use pin::{NewPinRecord, PinRecord};
pub use pin_entry::{CheckOutcome, PinEntry};
pub use session::{CurrentAdmin, keys as session_keys};
pub use toast::{Toast, ToastVariant};
