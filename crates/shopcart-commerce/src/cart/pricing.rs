//! Cart pricing calculations.

use crate::cart::Cart;
use crate::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat discount applied to every cart: 10%.
pub const DISCOUNT_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Share of the subtotal that is payable: `1 - DISCOUNT_RATE`.
pub const DISCOUNTED_FACTOR: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Subtotal before the discount.
    pub subtotal: Money,
    /// Amount taken off by the discount.
    pub discount: Money,
    /// Payable total (`subtotal × 0.9`).
    pub total: Money,
    /// Sum of quantities.
    pub item_count: u64,
    /// Number of distinct products.
    pub line_count: usize,
}

impl CartSummary {
    /// Price a cart in the given currency.
    pub fn for_cart(cart: &Cart, currency: Currency) -> Self {
        let subtotal = Money::new(cart.subtotal(), currency);
        Self {
            subtotal,
            discount: subtotal.multiply_decimal(DISCOUNT_RATE),
            total: subtotal.multiply_decimal(DISCOUNTED_FACTOR),
            item_count: cart.item_count(),
            line_count: cart.len(),
        }
    }

    /// Check if there is anything to pay for.
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}
