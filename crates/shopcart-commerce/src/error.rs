//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart, catalog and checkout operations.
///
/// Cart mutations on [`crate::CartStore`] never return these; they are
/// produced by decoding stored carts, reading the catalog and checkout.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Stored cart data violates the cart invariants.
    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    /// Catalog could not be read or parsed.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout form has missing or invalid fields.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Unknown checkout form field name.
    #[error("Unknown checkout field: {0}")]
    UnknownCheckoutField(String),

    /// The order for this checkout has already been placed.
    #[error("Order already placed: {0}")]
    OrderAlreadyPlaced(String),
}

