//! Tanish Arts storefront library.
//!
//! Client-side commerce state for the Tanish Arts shop: accounts and the
//! current session, the cart, the wishlist, saved addresses, catalog reviews
//! and live location. Everything is owned by one [`Storefront`] and
//! persisted through a [`DurableStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;
pub mod state;

pub use config::{ConfigError, StorefrontConfig};
pub use db::{DurableStore, FileStore, MemoryStore, StoreError};
pub use error::CommerceError;
pub use navigation::NavigationIntent;
pub use state::{SAVE_FAILED_MESSAGE, Storefront, StorefrontSummary};
