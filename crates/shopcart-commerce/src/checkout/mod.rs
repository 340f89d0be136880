//! Checkout module.
//!
//! Contains the checkout form and simulated order placement. Nothing here
//! talks to a payment processor.

mod form;
mod order;

pub use form::{CheckoutField, CheckoutForm};
pub use order::{place_order, Checkout, OrderConfirmation};
