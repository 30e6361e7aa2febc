//! Key-value persistence for the Raheem Cooling storefront.
//!
//! The storefront keeps its client-side state (cart, ratings, newsletter and
//! contact records, visitor count) in named slots of a string key/value
//! store, one JSON document per slot. This crate provides the store
//! abstraction, an in-memory and a file-backed implementation, and typed
//! slots with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use cooling_store::{keys, FileStore, Slot};
//!
//! let store = FileStore::open(".cooling/storage")?;
//! let subscribers: Slot<_, Vec<String>> = Slot::new(store, keys::NEWSLETTER_SUBSCRIBERS);
//!
//! subscribers.update(|emails| emails.push("someone@example.com".to_string()))?;
//! ```

mod error;
mod file;
mod kv;
mod memory;
mod slot;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::Store;
pub use memory::MemoryStore;
pub use slot::{keys, Slot};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{keys, FileStore, MemoryStore, Slot, Store, StoreError};
}
