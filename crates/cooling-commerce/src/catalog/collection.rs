//! The immutable product collection.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{AcType, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::search::PriceRange;

/// A validated, read-only product collection.
///
/// Cloning is cheap: clones share the same product list, so any number of
/// query engines can read one catalog. A reload replaces the catalog
/// wholesale; products are never patched in place.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog, rejecting invalid or duplicate records.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id) {
                return Err(CommerceError::DuplicateProduct(product.id));
            }
        }
        debug!(count = products.len(), "catalog loaded");
        Ok(Self {
            products: products.into(),
        })
    }

    /// An empty catalog; every query over it yields zero results.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the `products.json` document.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Parse the `products.json` document, falling back to an empty catalog
    /// when it is unavailable or malformed.
    pub fn from_json_or_empty(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            warn!(error = %e, "product data unusable, using empty catalog");
            Self::empty()
        })
    }

    /// All products, in source order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Find a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Find a product by id, or fail with `ProductNotFound`.
    pub fn require(&self, id: ProductId) -> Result<&Product, CommerceError> {
        self.get(id).ok_or(CommerceError::ProductNotFound(id))
    }

    /// The lowest and highest price in the catalog.
    ///
    /// An empty catalog spans `[0, 0]`.
    pub fn price_span(&self) -> PriceRange {
        let min = self.products.iter().map(|p| p.price).min().unwrap_or(0);
        let max = self.products.iter().map(|p| p.price).max().unwrap_or(0);
        PriceRange::new(min, max)
    }

    /// A new catalog holding only products of one type, in source order.
    pub fn restrict_to(&self, ac_type: AcType) -> Catalog {
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.ac_type == ac_type)
            .cloned()
            .collect();
        Catalog {
            products: products.into(),
        }
    }
}
