//! Shopping cart module.
//!
//! Contains the cart, its lines, and pricing with the flat discount.

mod cart;
mod line;
mod pricing;

pub use cart::Cart;
pub use line::{CartLine, NewCartLine};
pub use pricing::{CartSummary, DISCOUNTED_FACTOR, DISCOUNT_RATE};
