//! Core types for Tanish Arts.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod id;
pub mod postal;
pub mod price;
pub mod status;
pub mod username;

pub use credential::PasswordDigest;
pub use id::*;
pub use postal::PostalAddress;
pub use price::{CurrencyCode, Price};
pub use status::NotificationKind;
pub use username::{Username, UsernameError};
