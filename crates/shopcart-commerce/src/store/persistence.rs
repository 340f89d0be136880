//! Persistence port for the cart store.

use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Storage key the cart is kept under by default.
pub const DEFAULT_CART_KEY: &str = "shoppingCart";

/// Errors reported by a persistence backend.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The backend could not be read from or written to.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The stored bytes are not text.
    #[error("Stored cart is not valid UTF-8")]
    NotUtf8,
}

#[cfg(feature = "storage")]
impl From<shopcart_cache::CacheError> for PersistenceError {
    fn from(e: shopcart_cache::CacheError) -> Self {
        PersistenceError::Unavailable(e.to_string())
    }
}

/// A durable slot holding one serialized cart.
///
/// The store decides what the blob contains; implementations only keep it.
pub trait CartPersistence {
    /// Read the stored blob. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, PersistenceError>;

    /// Replace the stored blob.
    fn save(&self, blob: &str) -> Result<(), PersistenceError>;
}

impl<T: CartPersistence + ?Sized> CartPersistence for &T {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, blob: &str) -> Result<(), PersistenceError> {
        (**self).save(blob)
    }
}

impl<T: CartPersistence + ?Sized> CartPersistence for Box<T> {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, blob: &str) -> Result<(), PersistenceError> {
        (**self).save(blob)
    }
}

/// In-memory slot. Clones share the same blob.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    blob: Arc<Mutex<Option<String>>>,
}

impl MemoryPersistence {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds a blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(Mutex::new(Some(blob.into()))),
        }
    }

    /// Current contents of the slot.
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|b| b.clone())
    }
}

impl CartPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        self.blob
            .lock()
            .map(|b| b.clone())
            .map_err(|_| PersistenceError::Unavailable("memory slot lock poisoned".to_string()))
    }

    fn save(&self, blob: &str) -> Result<(), PersistenceError> {
        let mut slot = self
            .blob
            .lock()
            .map_err(|_| PersistenceError::Unavailable("memory slot lock poisoned".to_string()))?;
        *slot = Some(blob.to_string());
        Ok(())
    }
}

/// One key of a [`shopcart_cache::Cache`] used as the cart slot.
#[cfg(feature = "storage")]
#[derive(Debug, Clone)]
pub struct CacheSlot {
    cache: shopcart_cache::Cache,
    key: String,
}

#[cfg(feature = "storage")]
impl CacheSlot {
    /// Bind a cache key.
    pub fn new(cache: shopcart_cache::Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    /// Bind [`DEFAULT_CART_KEY`].
    pub fn default_key(cache: shopcart_cache::Cache) -> Self {
        Self::new(cache, DEFAULT_CART_KEY)
    }

    /// The bound key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying cache.
    pub fn cache(&self) -> &shopcart_cache::Cache {
        &self.cache
    }
}

#[cfg(feature = "storage")]
impl CartPersistence for CacheSlot {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        match self.cache.get_raw(&self.key)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| PersistenceError::NotUtf8),
            None => Ok(None),
        }
    }

    fn save(&self, blob: &str) -> Result<(), PersistenceError> {
        self.cache.set_raw(&self.key, blob.as_bytes())?;
        Ok(())
    }
}
