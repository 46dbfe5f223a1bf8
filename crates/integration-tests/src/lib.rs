//! Integration tests for the Tanish Arts storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tanish-arts-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_flow` - Sign-up, login, logout and reload across restarts
//! - `address_book` - Default/selection invariants over command sequences
//! - `cart_wishlist` - Cart and wishlist commands against a file store
//! - `live_location` - Sensor queries, timeouts and superseded results
//!
//! This crate only holds shared fixtures; the tests live in `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use tanish_arts_core::{CurrencyCode, PostalAddress, Price, ProductId};
use tanish_arts_storefront::models::{Catalog, Product};
use tanish_arts_storefront::services::PasswordHashing;
use tanish_arts_storefront::{MemoryStore, Storefront, StorefrontConfig};

/// Product ids present in [`catalog`].
pub const KNOWN_PRODUCTS: [i32; 3] = [7, 42, 99];

/// A small catalog with three products.
#[must_use]
pub fn catalog() -> Catalog {
    Catalog::new(vec![
        product(7, "Warli Wall Hanging", "Decor", 89_900),
        product(42, "Pattachitra Scroll", "Paintings", 349_900),
        product(99, "Terracotta Horse", "Sculpture", 159_900),
    ])
}

fn product(id: i32, name: &str, category: &str, paise: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Price::new(Decimal::new(paise, 2), CurrencyCode::INR),
        description: String::new(),
        reviews: Vec::new(),
    }
}

/// Configuration with cheap password hashing and a short sensor timeout.
#[must_use]
pub fn config(data_dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        data_dir: data_dir.to_path_buf(),
        location_timeout: Duration::from_millis(50),
        catalog_path: None,
        password_hashing: PasswordHashing::Minimal,
    }
}

/// A fresh storefront over an in-memory store.
#[must_use]
pub fn memory_storefront() -> Storefront<MemoryStore> {
    Storefront::open(
        config(Path::new(".")),
        MemoryStore::new(),
        catalog(),
    )
}

/// Reopen a storefront from the store another instance left behind.
#[must_use]
pub fn reopen(storefront: Storefront<MemoryStore>) -> Storefront<MemoryStore> {
    let config = storefront.config().clone();
    Storefront::open(config, storefront.into_store(), catalog())
}

/// Postal fields for a recipient in Jaipur.
#[must_use]
pub fn postal(name: &str) -> PostalAddress {
    PostalAddress {
        full_name: name.to_string(),
        street: "12 MI Road".to_string(),
        street2: None,
        city: "Jaipur".to_string(),
        state: "Rajasthan".to_string(),
        postal_code: "302001".to_string(),
        country: "India".to_string(),
        phone: Some("+91 141 000 0000".to_string()),
    }
}
