//! Key-Value store wrapper with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// File extension used by the directory backend.
const ENTRY_EXTENSION: &str = "json";

/// Type-safe cache backed by a memory map or a directory on disk.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Clones share the same underlying
/// storage.
#[derive(Debug, Clone)]
pub struct Cache {
    backend: Backend,
}

#[derive(Debug, Clone)]
enum Backend {
    Memory(Arc<RwLock<HashMap<String, Vec<u8>>>>),
    Directory(PathBuf),
}

impl Cache {
    /// Create an empty in-memory store.
    ///
    /// # Example
    ///
    /// ```rust
    /// let cache = shopcart_cache::Cache::memory();
    /// assert!(cache.keys().unwrap().is_empty());
    /// ```
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(RwLock::new(HashMap::new()))),
        }
    }

    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".shopcart")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        tracing::debug!(dir = %dir.display(), "opened directory store");
        Ok(Self {
            backend: Backend::Directory(dir.to_path_buf()),
        })
    }

    /// Get the raw bytes stored under a key.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(map) => {
                let map = map.read().map_err(|_| poisoned())?;
                Ok(map.get(key).cloned())
            }
            Backend::Directory(dir) => match fs::read(entry_path(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(CacheError::StoreError(e.to_string())),
            },
        }
    }

    /// Store raw bytes under a key, replacing any previous value.
    pub fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(map) => {
                let mut map = map.write().map_err(|_| poisoned())?;
                map.insert(key.to_string(), bytes.to_vec());
                Ok(())
            }
            Backend::Directory(dir) => {
                // Write to a sibling file first so readers never see a torn entry.
                let target = entry_path(dir, key);
                let staging = target.with_extension("json.tmp");
                fs::write(&staging, bytes).map_err(|e| CacheError::StoreError(e.to_string()))?;
                fs::rename(&staging, &target).map_err(|e| CacheError::StoreError(e.to_string()))
            }
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lines: Option<Vec<CartLine>> = cache.get("shoppingCart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("shoppingCart", &lines)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }

    /// Delete a value from the cache.
    ///
    /// Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(map) => {
                let mut map = map.write().map_err(|_| poisoned())?;
                map.remove(key);
                Ok(())
            }
            Backend::Directory(dir) => match fs::remove_file(entry_path(dir, key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(CacheError::StoreError(e.to_string())),
            },
        }
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(map) => {
                let map = map.read().map_err(|_| poisoned())?;
                Ok(map.contains_key(key))
            }
            Backend::Directory(dir) => Ok(entry_path(dir, key).is_file()),
        }
    }

    /// Get all keys in the cache, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = match &self.backend {
            Backend::Memory(map) => {
                let map = map.read().map_err(|_| poisoned())?;
                map.keys().cloned().collect::<Vec<_>>()
            }
            Backend::Directory(dir) => {
                let entries =
                    fs::read_dir(dir).map_err(|e| CacheError::StoreError(e.to_string()))?;
                let mut keys = Vec::new();
                for entry in entries {
                    let path = entry
                        .map_err(|e| CacheError::StoreError(e.to_string()))?
                        .path();
                    if path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION) {
                        if let Some(stem) = path.file_stem() {
                            keys.push(stem.to_string_lossy().into_owned());
                        }
                    }
                }
                keys
            }
        };
        keys.sort();
        Ok(keys)
    }

    /// Whether this cache lives only in memory.
    pub fn is_memory(&self) -> bool {
        matches!(self.backend, Backend::Memory(_))
    }
}

fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.{ENTRY_EXTENSION}"))
}

fn poisoned() -> CacheError {
    CacheError::StoreError("memory store lock poisoned".to_string())
}

/// Keys double as file names in the directory backend.
fn validate_key(key: &str) -> Result<(), CacheError> {
    let bad = key.is_empty()
        || key.contains(['/', '\\', '\0'])
        || key.contains("..")
        || key.trim() != key;
    if bad {
        return Err(CacheError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let session = "abc123";
/// let key = shopcart_cache::cache_key!("cart", session);
/// assert_eq!(key, "cart:abc123");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Entry {
        name: String,
        count: u32,
    }

    fn entry() -> Entry {
        Entry {
            name: "shirt".to_string(),
            count: 2,
        }
    }

    #[test]
    fn test_memory_set_get() {
        let cache = Cache::memory();
        cache.set("item", &entry()).unwrap();

        let loaded: Option<Entry> = cache.get("item").unwrap();
        assert_eq!(loaded, Some(entry()));
    }

    #[test]
    fn test_memory_missing_key() {
        let cache = Cache::memory();
        let loaded: Option<Entry> = cache.get("missing").unwrap();
        assert!(loaded.is_none());
        assert!(!cache.exists("missing").unwrap());
    }

    #[test]
    fn test_memory_clones_share_storage() {
        let cache = Cache::memory();
        let other = cache.clone();

        cache.set_raw("k", b"[]").unwrap();
        assert_eq!(other.get_raw("k").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_delete_and_exists() {
        let cache = Cache::memory();
        cache.set("item", &entry()).unwrap();
        assert!(cache.exists("item").unwrap());

        cache.delete("item").unwrap();
        assert!(!cache.exists("item").unwrap());

        // Deleting twice is fine
        cache.delete("item").unwrap();
    }

    #[test]
    fn test_get_malformed_json() {
        let cache = Cache::memory();
        cache.set_raw("item", b"{not json").unwrap();

        let result = cache.get::<Entry>("item");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_directory_backend() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path().join("store")).unwrap();
        assert!(!cache.is_memory());

        cache.set("b", &entry()).unwrap();
        cache.set("a", &entry()).unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);

        let reopened = Cache::open(dir.path().join("store")).unwrap();
        let loaded: Option<Entry> = reopened.get("a").unwrap();
        assert_eq!(loaded, Some(entry()));

        reopened.delete("a").unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_invalid_keys() {
        let cache = Cache::memory();
        for key in ["", "../escape", "a/b", "a\\b", " padded"] {
            assert!(
                matches!(cache.get_raw(key), Err(CacheError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_cache_key_macro() {
        let key = cache_key!("cart", "session", 7);
        assert_eq!(key, "cart:session:7");
    }
}
