//! PIN Gate Core - Shared domain types.
//!
//! This crate provides the types shared by every PIN Gate component:
//! - `web` - PIN check page and admin dashboard
//! - `cli` - Migrations, admin credentials and PIN seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Password hashing lives here because both the web login and
//! the CLI need the same verification rules.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, PIN codes, PIN status and stored credentials

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
