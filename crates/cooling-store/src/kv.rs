//! Key-Value store abstraction with automatic serialization.

use crate::StoreError;
use serde::{de::DeserializeOwned, Serialize};

/// A string-valued key/value store.
///
/// Mirrors the browser `localStorage` contract the storefront was written
/// against: every value is a string (in practice a JSON document), every
/// write replaces the previous value wholesale, and reads are synchronous.
pub trait Store {
    /// Get the raw value stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Get all keys in the store.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Check if a key exists in the store.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_raw(key)?.is_some())
    }

    /// Get a value and deserialize it from JSON.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartLine>> = store.get("raheemCoolingCart")?;
    /// ```
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
    {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize a value to JSON and store it.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// store.set("raheemCoolingCart", &lines)?;
    /// ```
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key)
    }
}

/// Helper to build namespaced keys.
///
/// # Example
///
/// ```rust,ignore
/// let key = storage_key!("product", product_id);
/// // Returns "product-7"
/// ```
#[macro_export]
macro_rules! storage_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push('-');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use crate::MemoryStore;

    use super::*;

    #[test]
    fn test_typed_roundtrip() {
        let store = MemoryStore::new();
        store.set("numbers", &vec![1, 2, 3]).unwrap();

        let numbers: Option<Vec<i32>> = store.get("numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_get_missing_key() {
        let store = MemoryStore::new();
        let value: Option<String> = store.get("missing").unwrap();
        assert!(value.is_none());
        assert!(!store.exists("missing").unwrap());
    }

    #[test]
    fn test_get_malformed_value_is_error() {
        let store = MemoryStore::new();
        store.set_raw("broken", "{not json").unwrap();

        let result: Result<Option<Vec<i32>>, _> = store.get("broken");
        assert!(matches!(result, Err(StoreError::SerializeError(_))));
    }

    #[test]
    fn test_store_through_reference() {
        let store = MemoryStore::new();
        let by_ref = &store;
        by_ref.set_raw("k", "v").unwrap();
        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_storage_key_macro() {
        let id = 7;
        assert_eq!(storage_key!("product", id), "product-7");
        assert_eq!(storage_key!("a", "b", 3), "a-b-3");
    }
}
