//! Storefront domain logic for Raheem Cooling.
//!
//! This crate holds everything the storefront pages compute, independent of
//! rendering:
//!
//! - **Catalog**: products, filter metadata, star ratings, home page picks
//! - **Search**: the query engine that filters, sorts and paginates a
//!   catalog view, and the facet options shown beside it
//! - **Cart**: the cart ledger, written through to storage on every change
//! - **Engagement**: user ratings, newsletter, contact form, visitor count
//! - **Content**: FAQ search and the installation gallery
//!
//! # Example
//!
//! ```rust,ignore
//! use cooling_commerce::prelude::*;
//! use cooling_store::MemoryStore;
//!
//! let catalog = Catalog::from_json(include_str!("../data/products.json"))?;
//!
//! let mut engine = QueryEngine::for_view(catalog.clone(), CatalogView::category(AcType::Split));
//! engine.set_facet_filter(Facet::Brand, "Daikin", true);
//! engine.set_sort(SortKey::PriceAsc);
//! let results = engine.evaluate();
//!
//! let mut cart = CartLedger::load(MemoryStore::new());
//! cart.add_item(results.page_items()[0])?;
//! println!("Total: {}", cart.total_price()?);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod content;
pub mod engagement;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{AcType, Catalog, Facet, FilterMetadata, Product, StarRating};

    // Search
    pub use crate::search::{
        CatalogView, FacetGroup, PageLink, Pagination, PriceRange, QueryDescriptor, QueryEngine,
        QueryResults, SortKey,
    };

    // Cart
    pub use crate::cart::{CartEvent, CartLedger, CartLine};

    // Engagement
    pub use crate::engagement::{
        ContactForm, ContactLog, NewsletterList, UserRatings, VisitorCounter,
    };

    // Content
    pub use crate::content::{FaqItem, FaqQuery, GalleryFilter, GalleryItem, GalleryView};
}
