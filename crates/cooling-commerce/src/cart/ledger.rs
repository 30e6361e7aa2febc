//! The persisted cart ledger.

use std::fmt;

use cooling_store::{keys, Slot, Store};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cart::{CartLine, MAX_QUANTITY_PER_LINE};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A change to the cart, delivered to subscribers after it is applied in
/// memory and before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum CartEvent {
    /// A product was added or its quantity bumped by one.
    ItemAdded {
        product_id: ProductId,
        name: String,
        quantity: u32,
    },
    ItemRemoved { product_id: ProductId },
    QuantityChanged { product_id: ProductId, quantity: u32 },
    Cleared,
}

type Listener = Box<dyn FnMut(&CartEvent) + Send>;

/// The authoritative list of cart lines, written through to storage.
///
/// Every mutation is applied in memory first and then the whole line list
/// is saved. If the save fails the error is returned but the in-memory
/// change stays.
pub struct CartLedger<S: Store> {
    slot: Slot<S, Vec<CartLine>>,
    lines: Vec<CartLine>,
    listeners: Vec<Listener>,
}

impl<S: Store> CartLedger<S> {
    /// Rehydrate the ledger from the cart slot.
    ///
    /// Absent or malformed data yields an empty cart. Zero-quantity lines
    /// are dropped and duplicate lines for one product are merged.
    pub fn load(store: S) -> Self {
        let slot = Slot::new(store, keys::CART);
        let lines = sanitize(slot.load_or_default());
        debug!(lines = lines.len(), "cart loaded");
        Self {
            slot,
            lines,
            listeners: Vec::new(),
        }
    }

    /// Register a callback for cart changes.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&CartEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a product.
    ///
    /// An existing line is incremented in place; otherwise a line is
    /// appended with a snapshot of the product's name, price and image.
    pub fn add_item(&mut self, product: &Product) -> Result<(), CommerceError> {
        let quantity = match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => {
                let next = i64::from(line.quantity) + 1;
                if next > MAX_QUANTITY_PER_LINE {
                    return Err(CommerceError::QuantityExceedsLimit(
                        next,
                        MAX_QUANTITY_PER_LINE,
                    ));
                }
                line.quantity += 1;
                line.quantity
            }
            None => {
                self.lines.push(CartLine::from_product(product));
                1
            }
        };

        debug!(product_id = %product.id, quantity, "item added to cart");
        self.notify(CartEvent::ItemAdded {
            product_id: product.id,
            name: product.name.clone(),
            quantity,
        });
        self.persist()
    }

    /// Remove a product's line, if present.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<(), CommerceError> {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() != before {
            debug!(%product_id, "item removed from cart");
            self.notify(CartEvent::ItemRemoved { product_id });
        }
        self.persist()
    }

    /// Set a line's quantity. Zero or less removes the line; a product not
    /// in the cart is ignored.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| CommerceError::InvalidQuantity(quantity))?;

        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            debug!(%product_id, "quantity update for product not in cart ignored");
            return Ok(());
        };
        line.quantity = quantity;

        self.notify(CartEvent::QuantityChanged {
            product_id,
            quantity,
        });
        self.persist()
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        if !self.lines.is_empty() {
            self.lines.clear();
            debug!("cart cleared");
            self.notify(CartEvent::Cleared);
        }
        self.persist()
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of price times quantity over all lines.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        let totals = self
            .lines
            .iter()
            .map(CartLine::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(totals.iter(), Currency::PKR).ok_or(CommerceError::Overflow)
    }

    fn notify(&mut self, event: CartEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn persist(&self) -> Result<(), CommerceError> {
        self.slot.save(&self.lines).map_err(|e| {
            warn!(error = %e, "failed to persist cart");
            CommerceError::from(e)
        })
    }
}

impl<S: Store + fmt::Debug> fmt::Debug for CartLedger<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartLedger")
            .field("slot", &self.slot)
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn sanitize(raw: Vec<CartLine>) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::with_capacity(raw.len());
    for line in raw {
        if line.quantity == 0 {
            continue;
        }
        let line = CartLine {
            quantity: line.quantity.min(MAX_QUANTITY_PER_LINE as u32),
            ..line
        };
        match lines.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .saturating_add(line.quantity)
                    .min(MAX_QUANTITY_PER_LINE as u32);
            }
            None => lines.push(line),
        }
    }
    lines
}
