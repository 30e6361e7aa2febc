//! Commerce error types.

use cooling_store::StoreError;
use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in catalog, cart and engagement operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A product record failed validation.
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: ProductId, reason: String },

    /// Two products share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Rating outside the 1-5 range.
    #[error("Invalid rating: {0} (expected 1-5)")]
    InvalidRating(i64),

    /// Email address failed validation.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// A form field failed validation.
    #[error("Invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Persisted storage could not be written.
    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
