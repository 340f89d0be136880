//! The cart store.

use crate::cart::{Cart, CartLine, CartSummary, NewCartLine, DISCOUNTED_FACTOR, DISCOUNT_RATE};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::store::observer::{SubscriptionId, Subscribers};
use crate::store::CartPersistence;

/// Owns the authoritative cart and keeps its persistence slot in sync.
///
/// The cart is loaded from `persistence` on construction; anything that
/// cannot be read or decoded leaves the store with an empty cart. Every
/// mutation is applied, saved, and then announced to subscribers. Save
/// failures are logged and otherwise ignored, so the in-memory cart
/// always reflects the last operation.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use shopcart_commerce::prelude::*;
///
/// let slot = MemoryPersistence::new();
/// let mut store = CartStore::new(slot.clone());
/// store.add_item(NewCartLine::new(ProductId::new(1), "Shirt", Decimal::new(2000, 2), "x"));
///
/// // A fresh store over the same slot sees the saved cart.
/// let reloaded = CartStore::new(slot);
/// assert_eq!(reloaded.cart(), store.cart());
/// ```
#[derive(Debug)]
pub struct CartStore<P: CartPersistence> {
    cart: Cart,
    persistence: P,
    currency: Currency,
    subscribers: Subscribers,
}

impl<P: CartPersistence> CartStore<P> {
    /// Create a store priced in USD, loading any saved cart.
    pub fn new(persistence: P) -> Self {
        Self::with_currency(persistence, Currency::default())
    }

    /// Create a store priced in `currency`, loading any saved cart.
    pub fn with_currency(persistence: P, currency: Currency) -> Self {
        let cart = load_cart(&persistence);
        Self {
            cart,
            persistence,
            currency,
            subscribers: Subscribers::default(),
        }
    }

    /// Add one unit of a product, or increment the existing line.
    pub fn add_item(&mut self, item: NewCartLine) {
        let product_id = item.product_id;
        self.cart.add(item);
        tracing::debug!(%product_id, "cart item added");
        self.commit();
    }

    /// Remove a product's line. Missing products are ignored.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let removed = self.cart.remove(product_id);
        tracing::debug!(%product_id, removed, "cart item removed");
        self.commit();
    }

    /// Set a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let changed = self.cart.set_quantity(product_id, quantity);
        tracing::debug!(%product_id, quantity, changed, "cart quantity set");
        self.commit();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        tracing::debug!("cart cleared");
        self.commit();
    }

    /// Σ `unit_price × quantity`.
    pub fn subtotal(&self) -> Money {
        Money::new(self.cart.subtotal(), self.currency)
    }

    /// Amount taken off the subtotal (10%).
    pub fn discount(&self) -> Money {
        self.subtotal().multiply_decimal(DISCOUNT_RATE)
    }

    /// Payable total: `subtotal × 0.9`, exact.
    pub fn discounted_total(&self) -> Money {
        self.subtotal().multiply_decimal(DISCOUNTED_FACTOR)
    }

    /// Full pricing breakdown.
    pub fn summary(&self) -> CartSummary {
        CartSummary::for_cart(&self.cart, self.currency)
    }

    /// Register a callback run with the cart after every mutation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Cart) + 'static,
    {
        self.subscribers.add(Box::new(callback))
    }

    /// Stop notifying a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.cart.get(product_id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.cart.contains(product_id)
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.cart.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Pricing currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The persistence backend.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn commit(&mut self) {
        self.save();
        self.subscribers.notify(&self.cart);
    }

    fn save(&self) {
        let blob = match serde_json::to_string(&self.cart) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.persistence.save(&blob) {
            tracing::warn!(error = %e, "failed to save cart");
        }
    }
}

fn load_cart<P: CartPersistence>(persistence: &P) -> Cart {
    let blob = match persistence.load() {
        Ok(Some(blob)) => blob,
        Ok(None) => return Cart::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load cart, starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Cart>(&blob) {
        Ok(cart) => {
            tracing::debug!(lines = cart.len(), "cart loaded");
            cart
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse saved cart, starting empty");
            Cart::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryPersistence, PersistenceError};
    use rust_decimal::Decimal;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn item(id: u64, title: &str, cents: i64) -> NewCartLine {
        NewCartLine::new(ProductId::new(id), title, Decimal::new(cents, 2), "x")
    }

    fn money(cents: i64) -> Money {
        Money::from_minor(cents, Currency::USD)
    }

    /// Persistence that refuses every operation.
    struct BrokenPersistence {
        saves: Cell<usize>,
    }

    impl CartPersistence for BrokenPersistence {
        fn load(&self) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Unavailable("disk on fire".to_string()))
        }

        fn save(&self, _blob: &str) -> Result<(), PersistenceError> {
            self.saves.set(self.saves.get() + 1);
            Err(PersistenceError::Unavailable("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_repeated_add_counts_calls() {
        for n in 1..=6 {
            let mut store = CartStore::new(MemoryPersistence::new());
            for _ in 0..n {
                store.add_item(item(7, "Shirt", 2000));
            }
            assert_eq!(store.line_count(), 1);
            assert_eq!(store.get(ProductId::new(7)).unwrap().quantity, n);
        }
    }

    #[test]
    fn test_shirt_scenario() {
        let mut store = CartStore::new(MemoryPersistence::new());
        store.add_item(item(1, "Shirt", 2000));
        store.add_item(item(1, "Shirt", 2000));

        assert_eq!(store.line_count(), 1);
        assert_eq!(store.get(ProductId::new(1)).unwrap().quantity, 2);
        assert_eq!(store.subtotal(), money(4000));
        assert_eq!(store.discounted_total(), money(3600));
    }

    #[test]
    fn test_remove_scenario() {
        let mut store = CartStore::new(MemoryPersistence::new());
        store.add_item(item(1, "A", 1000));
        store.add_item(item(2, "B", 500));
        store.remove_item(ProductId::new(1));

        let ids: Vec<ProductId> = store.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![ProductId::new(2)]);
        assert_eq!(store.subtotal(), money(500));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut store = CartStore::new(MemoryPersistence::new());
        store.add_item(item(1, "A", 1000));
        store.set_quantity(ProductId::new(1), 0);

        assert!(!store.contains(ProductId::new(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_quantity_matches_remove() {
        for q in [0, -1, -50] {
            let mut via_set = CartStore::new(MemoryPersistence::new());
            let mut via_remove = CartStore::new(MemoryPersistence::new());
            for store in [&mut via_set, &mut via_remove] {
                store.add_item(item(1, "A", 1000));
                store.add_item(item(2, "B", 250));
            }

            via_set.set_quantity(ProductId::new(1), q);
            via_remove.remove_item(ProductId::new(1));

            assert_eq!(via_set.cart(), via_remove.cart());
            assert_eq!(
                via_set.persistence().blob(),
                via_remove.persistence().blob()
            );
        }
    }

    #[test]
    fn test_empty_totals() {
        let store = CartStore::new(MemoryPersistence::new());
        assert!(store.subtotal().is_zero());
        assert!(store.discounted_total().is_zero());
        assert!(store.discount().is_zero());
    }

    #[test]
    fn test_discounted_total_is_exactly_nine_tenths() {
        let mut store = CartStore::new(MemoryPersistence::new());
        let prices = [1, 5, 33, 109_95, 15, 695, 9_99, 64];

        for (i, cents) in prices.into_iter().enumerate() {
            store.add_item(item(i as u64, "p", cents));
            store.set_quantity(ProductId::new(i as u64), (i as i64 % 3) + 1);

            let subtotal = store.subtotal();
            let total = store.discounted_total();
            assert_eq!(total.amount, subtotal.amount * Decimal::new(9, 1));
            assert_eq!(store.discount().amount + total.amount, subtotal.amount);
        }
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let slot = MemoryPersistence::new();
        let mut store = CartStore::new(slot.clone());

        store.add_item(item(1, "A", 1000));
        let saved: Cart = serde_json::from_str(&slot.blob().unwrap()).unwrap();
        assert_eq!(&saved, store.cart());

        store.set_quantity(ProductId::new(1), 3);
        let saved: Cart = serde_json::from_str(&slot.blob().unwrap()).unwrap();
        assert_eq!(saved.item_count(), 3);

        store.clear();
        assert_eq!(slot.blob().as_deref(), Some("[]"));
    }

    #[test]
    fn test_reload_round_trip() {
        let slot = MemoryPersistence::new();
        let mut store = CartStore::new(slot.clone());
        store.add_item(item(1, "Shirt", 2000));
        store.add_item(item(2, "Backpack", 10995));
        store.set_quantity(ProductId::new(2), 4);

        let reloaded = CartStore::new(slot);
        assert_eq!(reloaded.cart(), store.cart());
        assert_eq!(reloaded.subtotal(), store.subtotal());
    }

    #[test]
    fn test_reload_keeps_exact_prices() {
        let slot = MemoryPersistence::new();
        let mut store = CartStore::new(slot.clone());
        let prices = [
            Decimal::from_str_exact("0.1234567890123456789").unwrap(),
            Decimal::from_str_exact("12345678901234567.89").unwrap(),
            Decimal::new(10, 2),
        ];
        for (id, price) in prices.iter().enumerate() {
            store.add_item(NewCartLine::new(ProductId::new(id as u64), "Part", *price, ""));
        }

        let reloaded = CartStore::new(slot);
        assert_eq!(reloaded.cart(), store.cart());
        for (id, price) in prices.iter().enumerate() {
            assert_eq!(reloaded.get(ProductId::new(id as u64)).unwrap().unit_price, *price);
        }
        assert_eq!(reloaded.discounted_total(), store.discounted_total());
    }

    #[test]
    fn test_malformed_data_starts_empty() {
        for blob in ["not json", "{\"productId\":1}", "[{\"productId\":1}]", ""] {
            let store = CartStore::new(MemoryPersistence::with_blob(blob));
            assert!(store.is_empty(), "blob {blob:?} should load as empty");
        }
    }

    #[test]
    fn test_load_and_save_failures_are_swallowed() {
        let mut store = CartStore::new(BrokenPersistence {
            saves: Cell::new(0),
        });
        assert!(store.is_empty());

        store.add_item(item(1, "A", 1000));
        store.add_item(item(1, "A", 1000));

        assert_eq!(store.item_count(), 2);
        assert_eq!(store.persistence().saves.get(), 2);
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = CartStore::new(MemoryPersistence::new());

        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |cart| sink.borrow_mut().push(cart.item_count()));

        store.add_item(item(1, "A", 1000));
        store.add_item(item(1, "A", 1000));
        store.remove_item(ProductId::new(9));
        store.set_quantity(ProductId::new(1), 5);
        store.clear();
        assert_eq!(*seen.borrow(), vec![1, 2, 2, 5, 0]);

        assert!(store.unsubscribe(id));
        store.add_item(item(1, "A", 1000));
        assert_eq!(seen.borrow().len(), 5);
    }

    #[test]
    fn test_with_currency() {
        let mut store = CartStore::with_currency(MemoryPersistence::new(), Currency::EUR);
        store.add_item(item(1, "A", 1000));
        assert_eq!(store.currency(), Currency::EUR);
        assert_eq!(store.subtotal().display(), "\u{20ac}10.00");
        assert_eq!(store.summary().total.display(), "\u{20ac}9.00");
    }
}
