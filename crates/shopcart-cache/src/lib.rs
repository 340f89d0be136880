//! Type-safe Key-Value store for ShopCart.
//!
//! Provides a small, ergonomic API for keeping data in a key-value slot
//! with automatic JSON serialization. Two backends are available: an
//! in-memory map (shared between clones) and a directory on disk with one
//! file per key.
//!
//! # Example
//!
//! ```rust
//! use shopcart_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Line {
//!     product_id: u64,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::memory();
//!
//! cache.set("cart:session-1", &vec![Line { product_id: 1, quantity: 2 }])?;
//!
//! let lines: Option<Vec<Line>> = cache.get("cart:session-1")?;
//! assert_eq!(lines.map(|l| l.len()), Some(1));
//!
//! cache.delete("cart:session-1")?;
//! # Ok::<(), shopcart_cache::CacheError>(())
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError};
}
