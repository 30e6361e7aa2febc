//! External collaborators of the Raheem Cooling storefront.
//!
//! - [`source`]: where the product and filter metadata documents come from,
//!   with a per-attempt timeout and a [`RetryPolicy`]
//! - [`gateway`]: where contact and newsletter submissions go
//!
//! # Example
//!
//! ```rust,ignore
//! use cooling_data::{CatalogSource, FileSource, RetryPolicy};
//! use std::time::Duration;
//!
//! let source = FileSource::new("data")
//!     .with_timeout(Duration::from_secs(2))
//!     .with_retry(RetryPolicy::new(2));
//! let loaded = source.load_or_empty().await;
//! println!("{} products", loaded.catalog.len());
//! ```

pub mod error;
pub mod gateway;
pub mod retry;
pub mod source;

pub use error::{DataError, DataResult};
pub use gateway::{LocalGateway, SubmissionGateway};
pub use retry::{BackoffStrategy, RetryPolicy};
pub use source::{CatalogSource, FileSource, LoadedCatalog, StaticSource, FILTERS_FILE, PRODUCTS_FILE};
