//! Product catalog module.
//!
//! Contains product records as served by the catalog service, the
//! category list, and category filtering.

mod filter;
mod product;

pub use filter::CategoryFilter;
pub use product::{Catalog, Product, Rating};
