//! Shopping cart module.
//!
//! Contains cart line items and the ledger that persists them.

mod ledger;
mod line;

pub use ledger::{CartEvent, CartLedger};
pub use line::{CartLine, MAX_QUANTITY_PER_LINE};
