//! Per-product user rating overrides.

use std::collections::BTreeMap;

use cooling_store::{keys, storage_key, Slot, Store};
use tracing::debug;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Ratings the visitor gave products, stored as a JSON object mapping
/// `"product-{id}"` to an integer 1-5.
///
/// Overrides only change what is displayed; catalog sorting keeps using the
/// catalog rating.
#[derive(Debug)]
pub struct UserRatings<S: Store> {
    slot: Slot<S, BTreeMap<String, u8>>,
}

impl<S: Store> UserRatings<S> {
    pub fn new(store: S) -> Self {
        Self {
            slot: Slot::new(store, keys::USER_RATINGS),
        }
    }

    /// The visitor's rating for a product, if any.
    pub fn get(&self, product_id: ProductId) -> Option<u8> {
        self.slot
            .load_or_default()
            .get(&storage_key!("product", product_id))
            .copied()
    }

    /// Record a rating from 1 to 5.
    pub fn set(&self, product_id: ProductId, rating: i64) -> Result<(), CommerceError> {
        let stars = u8::try_from(rating)
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or(CommerceError::InvalidRating(rating))?;

        self.slot.update(|ratings| {
            ratings.insert(storage_key!("product", product_id), stars);
        })?;
        debug!(%product_id, stars, "user rating saved");
        Ok(())
    }

    /// Forget every rating.
    pub fn clear_all(&self) -> Result<(), CommerceError> {
        Ok(self.slot.clear()?)
    }

    /// The visitor's rating when set, otherwise the catalog rating.
    pub fn display_rating(&self, product: &Product) -> f64 {
        self.get(product.id)
            .map(f64::from)
            .unwrap_or(product.rating)
    }

    /// "(Your rating: 4/5)" or "(Rate this product)".
    pub fn label(&self, product_id: ProductId) -> String {
        match self.get(product_id) {
            Some(stars) => format!("(Your rating: {}/5)", stars),
            None => "(Rate this product)".to_string(),
        }
    }
}
