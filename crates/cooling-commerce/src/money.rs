//! Money type for representing monetary values.
//!
//! Uses integer amounts in the smallest unit the catalog prices in, so cart
//! totals never pick up floating-point error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Pakistani rupee. Catalog prices are whole rupees.
    #[default]
    PKR,
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "PKR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::PKR => "PKR",
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "Rs").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::PKR => "Rs",
            Currency::USD => "$",
        }
    }

    /// Get the number of decimal places in the stored amount.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::PKR => 0,
            Currency::USD => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "PKR" => Some(Currency::PKR),
            "USD" => Some(Currency::USD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest stored unit of the currency.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a rupee amount.
    pub fn rupees(amount: i64) -> Self {
        Self::new(amount, Currency::PKR)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Try to add another Money value, returning None if currencies don't
    /// match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on currency mismatch
    /// or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Format as a display string (e.g., "Rs 45,000" or "$1,234.50").
    pub fn display(&self) -> String {
        match self.currency {
            Currency::PKR => format!("{} {}", self.currency.symbol(), self.display_amount()),
            Currency::USD => format!("{}{}", self.currency.symbol(), self.display_amount()),
        }
    }

    /// Format the amount with thousands separators, without symbol.
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let whole = format_number(magnitude / divisor);

        if places == 0 {
            format!("{}{}", sign, whole)
        } else {
            let fraction = magnitude % divisor;
            format!(
                "{}{}.{:0width$}",
                sign,
                whole,
                fraction,
                width = places as usize
            )
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Group digits in threes with commas (e.g., 1234567 -> "1,234,567").
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
