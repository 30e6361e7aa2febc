//! Typed, named storage slots.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::{Store, StoreError};

/// Well-known slot names.
///
/// These are the `localStorage` keys the storefront pages have always used;
/// keeping them byte-for-byte lets existing persisted data keep loading.
pub mod keys {
    /// JSON array of cart lines.
    pub const CART: &str = "raheemCoolingCart";
    /// JSON object mapping `"product-{id}"` to a 1-5 user rating.
    pub const USER_RATINGS: &str = "userProductRatings";
    /// JSON array of subscriber email addresses.
    pub const NEWSLETTER_SUBSCRIBERS: &str = "newsletterSubscribers";
    /// JSON array of submitted contact forms.
    pub const CONTACT_SUBMISSIONS: &str = "contactSubmissions";
    /// Visitor count, stored as a bare integer.
    pub const VISITOR_COUNT: &str = "raheemCoolingVisitors";
}

/// A single named value of type `T` in a store.
///
/// The whole value is read and overwritten at once; there is no partial
/// update or versioning.
///
/// # Example
///
/// ```rust,ignore
/// use cooling_store::{keys, MemoryStore, Slot};
///
/// let slot: Slot<_, Vec<String>> = Slot::new(MemoryStore::new(), keys::NEWSLETTER_SUBSCRIBERS);
/// let mut emails = slot.load_or_default();
/// emails.push("a@b.co".to_string());
/// slot.save(&emails)?;
/// ```
#[derive(Debug, Clone)]
pub struct Slot<S, T> {
    store: S,
    key: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<S, T> Slot<S, T>
where
    S: Store,
    T: Serialize + DeserializeOwned + Default,
{
    /// Bind a slot to `key` in `store`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _phantom: PhantomData,
        }
    }

    /// The key this slot reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the value, reporting malformed data as an error.
    pub fn load(&self) -> Result<Option<T>, StoreError> {
        self.store.get(&self.key)
    }

    /// Load the value, treating absent, unreadable, or malformed data as
    /// the default.
    pub fn load_or_default(&self) -> T {
        match self.load() {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding unreadable slot");
                T::default()
            }
        }
    }

    /// Overwrite the stored value.
    pub fn save(&self, value: &T) -> Result<(), StoreError> {
        self.store.set(&self.key, value)
    }

    /// Remove the stored value.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.delete(&self.key)
    }

    /// Read-modify-write the value.
    ///
    /// The closure receives the current value (or the default) and the
    /// result is written back. Returns the value that was saved.
    pub fn update<F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut value = self.load_or_default();
        f(&mut value);
        self.save(&value)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_load_absent_is_none() {
        let slot: Slot<_, Vec<u32>> = Slot::new(MemoryStore::new(), "numbers");
        assert!(slot.load().unwrap().is_none());
        assert!(slot.load_or_default().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let slot: Slot<_, Vec<u32>> = Slot::new(store.clone(), "numbers");
        slot.save(&vec![4, 5]).unwrap();

        assert_eq!(slot.load().unwrap(), Some(vec![4, 5]));
        assert_eq!(store.get_raw("numbers").unwrap().as_deref(), Some("[4,5]"));
    }

    #[test]
    fn test_malformed_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set_raw(keys::CART, "definitely not json").unwrap();

        let slot: Slot<_, Vec<u32>> = Slot::new(store, keys::CART);
        assert!(slot.load().is_err());
        assert!(slot.load_or_default().is_empty());
    }

    #[test]
    fn test_wrong_shape_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set_raw("numbers", r#"{"an":"object"}"#).unwrap();

        let slot: Slot<_, Vec<u32>> = Slot::new(store, "numbers");
        assert!(slot.load_or_default().is_empty());
    }

    #[test]
    fn test_update_reads_modifies_and_writes() {
        let slot: Slot<_, Vec<String>> = Slot::new(MemoryStore::new(), "list");
        slot.update(|list| list.push("first".to_string())).unwrap();
        let saved = slot.update(|list| list.push("second".to_string())).unwrap();

        assert_eq!(saved, vec!["first", "second"]);
        assert_eq!(slot.load().unwrap().unwrap(), saved);
    }

    #[test]
    fn test_clear_removes_value() {
        let slot: Slot<_, u64> = Slot::new(MemoryStore::new(), "count");
        slot.save(&3).unwrap();
        slot.clear().unwrap();
        assert_eq!(slot.load_or_default(), 0);
    }

    #[test]
    fn test_slot_over_borrowed_store() {
        let store = MemoryStore::new();
        let slot: Slot<&MemoryStore, u64> = Slot::new(&store, "count");
        slot.save(&9).unwrap();
        assert_eq!(store.get_raw("count").unwrap().as_deref(), Some("9"));
    }
}
