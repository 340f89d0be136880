//! Stateful cart manager.
//!
//! Contains [`CartStore`], the persistence port it writes through, and the
//! subscription mechanism used to observe changes.

mod observer;
mod persistence;
mod store;

pub use observer::SubscriptionId;
#[cfg(feature = "storage")]
pub use persistence::CacheSlot;
pub use persistence::{CartPersistence, MemoryPersistence, PersistenceError, DEFAULT_CART_KEY};
pub use store::CartStore;
