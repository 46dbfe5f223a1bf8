//! Durable key/value storage for storefront state.
//!
//! Every persisted entity lives under its own key and is written as a JSON
//! document. There is no transaction across keys: a crash between two writes
//! can leave two entities out of step, and each is loaded independently.
//!
//! ## Keys
//!
//! - `cart` - product id to quantity map
//! - `user` - current session identity (absent when signed out)
//! - `wishlist` - ordered product ids
//! - `registeredUsers` - account records
//! - `addresses` - address book records
//! - `selectedAddressId` - selected address pointer (absent when unset)
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, for tests and embedding
//! - [`FileStore`] - one `<key>.json` file per key under a data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys for persisted entities.
pub mod keys {
    /// Key for the cart contents.
    pub const CART: &str = "cart";

    /// Key for the current session identity.
    pub const CURRENT_USER: &str = "user";

    /// Key for the wishlist product ids.
    pub const WISHLIST: &str = "wishlist";

    /// Key for the registered account records.
    pub const REGISTERED_USERS: &str = "registeredUsers";

    /// Key for the address book records.
    pub const ADDRESSES: &str = "addresses";

    /// Key for the selected address pointer.
    pub const SELECTED_ADDRESS_ID: &str = "selectedAddressId";
}

/// Errors from durable store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be used with this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Text key/value store that outlives the running process.
///
/// Implementations store values verbatim. Typed access goes through
/// [`load_json`] and [`save_json`].
pub trait DurableStore {
    /// Read the raw value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing medium cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the value cannot be written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing medium cannot be updated.
    fn clear(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Load and parse a JSON value.
///
/// Missing keys, unreadable storage and unparseable documents all come back
/// as `None`, so a corrupt entry starts that entity fresh instead of failing
/// startup.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: DurableStore + ?Sized,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value, starting fresh");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unparseable stored value");
            None
        }
    }
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StoreError` if serialization or the write fails.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: DurableStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.save(key, &raw)
}

/// Store `value` under `key` when present, clear the key when absent.
///
/// # Errors
///
/// Returns `StoreError` if serialization, the write, or the removal fails.
pub fn save_optional_json<T, S>(
    store: &mut S,
    key: &str,
    value: Option<&T>,
) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: DurableStore + ?Sized,
{
    match value {
        Some(value) => save_json(store, key, value),
        None => store.clear(key),
    }
}

/// Reject keys that are empty or could escape a directory-backed store.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_load_json_missing_key() {
        let store = MemoryStore::new();
        let value: Option<Vec<i32>> = load_json(&store, keys::WISHLIST);
        assert!(value.is_none());
    }

    #[test]
    fn test_load_json_parse_failure_is_absent() {
        let mut store = MemoryStore::new();
        store.save(keys::CART, "{not json").unwrap();
        let value: Option<BTreeMap<String, u32>> = load_json(&store, keys::CART);
        assert!(value.is_none());
    }

    #[test]
    fn test_load_json_wrong_shape_is_absent() {
        let mut store = MemoryStore::new();
        store.save(keys::WISHLIST, r#"{"a": 1}"#).unwrap();
        let value: Option<Vec<i32>> = load_json(&store, keys::WISHLIST);
        assert!(value.is_none());
    }

    #[test]
    fn test_save_then_load_json() {
        let mut store = MemoryStore::new();
        save_json(&mut store, keys::WISHLIST, &[3, 1, 2]).unwrap();
        assert_eq!(store.get(keys::WISHLIST), Some("[3,1,2]"));
        let value: Option<Vec<i32>> = load_json(&store, keys::WISHLIST);
        assert_eq!(value, Some(vec![3, 1, 2]));
    }

    #[test]
    fn test_save_optional_json_clears_when_absent() {
        let mut store = MemoryStore::new();
        save_optional_json(&mut store, keys::SELECTED_ADDRESS_ID, Some("addr-1")).unwrap();
        assert!(store.get(keys::SELECTED_ADDRESS_ID).is_some());

        save_optional_json::<str, _>(&mut store, keys::SELECTED_ADDRESS_ID, None).unwrap();
        assert!(store.get(keys::SELECTED_ADDRESS_ID).is_none());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key(keys::REGISTERED_USERS).is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a\\b").is_err());
    }
}
