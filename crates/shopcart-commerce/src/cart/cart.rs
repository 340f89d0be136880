//! The cart: an ordered set of lines keyed by product id.

use crate::cart::{CartLine, NewCartLine};
use crate::error::CommerceError;
use crate::ids::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A shopping cart.
///
/// Lines keep their insertion order. Invariants: at most one line per
/// product id, and every line has a quantity of at least 1. Decoding a
/// stored cart rejects data that breaks either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// An existing line only has its quantity incremented; the title, price
    /// and image it was first added with are kept.
    pub fn add(&mut self, item: NewCartLine) {
        if let Some(existing) = self.line_mut(item.product_id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }
        self.lines.push(item.into_line());
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() < len_before
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Products not in the
    /// cart are ignored. Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.line_mut(product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ `unit_price × quantity` over all lines.
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.line_total()))
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CommerceError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if line.quantity == 0 {
                return Err(CommerceError::InvalidCart(format!(
                    "product {} has quantity 0",
                    line.product_id
                )));
            }
            if !seen.insert(line.product_id) {
                return Err(CommerceError::InvalidCart(format!(
                    "product {} appears more than once",
                    line.product_id
                )));
            }
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str, cents: i64) -> NewCartLine {
        NewCartLine::new(ProductId::new(id), title, Decimal::new(cents, 2), "img")
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        cart.add(item(1, "Shirt", 2000));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_same_item_increments_quantity() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(item(1, "Shirt", 2000));
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_keeps_first_title_and_price() {
        let mut cart = Cart::new();
        cart.add(item(1, "Shirt", 2000));
        cart.add(item(1, "Renamed Shirt", 9900));

        let line = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(line.title, "Shirt");
        assert_eq!(line.unit_price, Decimal::new(2000, 2));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(item(3, "C", 100));
        cart.add(item(1, "A", 100));
        cart.add(item(2, "B", 100));
        cart.add(item(1, "A", 100));

        let ids: Vec<u64> = cart.lines().iter().map(|l| l.product_id.get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(item(1, "Shirt", 1000));
        cart.add(item(2, "Hat", 500));

        assert!(cart.remove(ProductId::new(1)));
        assert!(!cart.contains(ProductId::new(1)));
        assert_eq!(cart.subtotal(), Decimal::new(500, 2));

        assert!(!cart.remove(ProductId::new(99)));
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(item(1, "Shirt", 1000));

        assert!(cart.set_quantity(ProductId::new(1), 4));
        assert_eq!(cart.item_count(), 4);
        assert!(!cart.set_quantity(ProductId::new(1), 4));
    }

    #[test]
    fn test_set_quantity_non_positive_removes() {
        for q in [0, -1, i64::MIN] {
            let mut cart = Cart::new();
            cart.add(item(1, "Shirt", 1000));
            cart.add(item(2, "Hat", 500));

            let mut expected = cart.clone();
            expected.remove(ProductId::new(1));

            cart.set_quantity(ProductId::new(1), q);
            assert_eq!(cart, expected, "quantity {q} should remove the line");
        }
    }

    #[test]
    fn test_set_quantity_missing_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(item(1, "Shirt", 1000));

        assert!(!cart.set_quantity(ProductId::new(2), 3));
        assert_eq!(cart.len(), 1);
        assert!(!cart.contains(ProductId::new(2)));
    }

    #[test]
    fn test_set_quantity_clamps_huge_values() {
        let mut cart = Cart::new();
        cart.add(item(1, "Shirt", 1));
        cart.set_quantity(ProductId::new(1), i64::MAX);

        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(), Decimal::ZERO);

        cart.add(item(1, "Shirt", 2000));
        cart.add(item(1, "Shirt", 2000));
        cart.add(item(2, "Socks", 399));
        assert_eq!(cart.subtotal(), Decimal::new(4399, 2));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(item(1, "Shirt", 2000));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add(item(1, "Shirt", 2000));
        cart.add(item(2, "Fjallraven Backpack", 10995));
        cart.set_quantity(ProductId::new(2), 3);

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));

        let decoded: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_decode_rejects_zero_quantity() {
        let json = r#"[{"productId":1,"title":"a","unitPrice":1.5,"imageRef":"","quantity":0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_decode_rejects_duplicate_products() {
        let json = r#"[
            {"productId":1,"title":"a","unitPrice":1,"imageRef":"","quantity":1},
            {"productId":1,"title":"b","unitPrice":2,"imageRef":"","quantity":2}
        ]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }
}
