//! Product catalog module.
//!
//! Contains the product record, the validated collection, filter metadata,
//! star ratings and the home page showcase helpers.

mod collection;
mod metadata;
mod product;
mod rating;
mod showcase;

pub use collection::Catalog;
pub use metadata::{brand_icon, FilterMetadata, PriceBucket};
pub use product::{AcType, Facet, Product};
pub use rating::StarRating;
pub use showcase::{random_pick, Showcase};
