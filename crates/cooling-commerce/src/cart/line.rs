//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// One product-plus-quantity entry in the cart.
///
/// Name, price and image are copied from the product when it is first
/// added, so later catalog changes don't affect lines already in the cart.
/// The JSON shape is the one stored under the cart slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in whole rupees at add-time.
    pub price: i64,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// A new line with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    pub fn unit_price(&self) -> Money {
        Money::rupees(self.price)
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price()
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_product() {
        let product = Product::new(7, "Gree Pular", 2000).with_image("gree.jpg");
        let line = CartLine::from_product(&product);
        assert_eq!(line.product_id, ProductId::new(7));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.image, "gree.jpg");
    }

    #[test]
    fn test_json_shape() {
        let line = CartLine::from_product(&Product::new(3, "Unit", 45000));
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["quantity"], 1);
        assert!(json.get("product_id").is_none());
    }

    #[test]
    fn test_line_total() {
        let mut line = CartLine::from_product(&Product::new(1, "Unit", 45000));
        line.quantity = 3;
        assert_eq!(line.line_total().unwrap(), Money::rupees(135000));

        line.price = i64::MAX;
        assert!(matches!(line.line_total(), Err(CommerceError::Overflow)));
    }
}
