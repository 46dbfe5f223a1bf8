//! Tanish Arts Core - Shared domain types.
//!
//! This crate provides the types shared by every Tanish Arts component:
//! - `storefront` - Client-side commerce state (cart, wishlist, addresses, session)
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no clocks.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, usernames, digests, prices, and postal fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
