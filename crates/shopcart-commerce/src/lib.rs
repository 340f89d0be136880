//! Cart state, pricing, catalog and checkout types for ShopCart.
//!
//! The heart of the crate is [`CartStore`]: it owns the cart lines,
//! applies the add / remove / set-quantity / clear rules, writes the cart
//! through a [`CartPersistence`] port after every mutation and notifies
//! subscribers.
//!
//! - **Cart**: lines keyed by product id, pricing with the flat 10% discount
//! - **Store**: the stateful cart manager, persistence port, observers
//! - **Catalog**: products, categories and category filtering
//! - **Checkout**: the checkout form and simulated order placement
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use shopcart_commerce::prelude::*;
//!
//! let mut store = CartStore::new(MemoryPersistence::new());
//!
//! let shirt = NewCartLine::new(ProductId::new(1), "Shirt", Decimal::new(2000, 2), "shirt.png");
//! store.add_item(shirt.clone());
//! store.add_item(shirt);
//!
//! assert_eq!(store.item_count(), 2);
//! assert_eq!(store.subtotal().display(), "$40.00");
//! assert_eq!(store.discounted_total().display(), "$36.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod store;

pub use error::CommerceError;
pub use ids::{OrderId, ProductId};
pub use money::{Currency, Money};
pub use store::{CartPersistence, CartStore, MemoryPersistence, PersistenceError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{OrderId, ProductId};
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartSummary, NewCartLine, DISCOUNT_RATE};

    // Store
    #[cfg(feature = "storage")]
    pub use crate::store::CacheSlot;
    pub use crate::store::{
        CartPersistence, CartStore, MemoryPersistence, PersistenceError, SubscriptionId,
    };

    // Catalog
    pub use crate::catalog::{Catalog, CategoryFilter, Product, Rating};

    // Checkout
    pub use crate::checkout::{place_order, Checkout, CheckoutField, CheckoutForm, OrderConfirmation};
}
