//! Key-value store for device-level preferences
//!
//! A thin wrapper around sled storing JSON-encoded values. The session core
//! only keeps plain flags here; the bearer token lives in the secret store.

use serde::{de::DeserializeOwned, Serialize};
use sled::Db;
use std::sync::Arc;
use thiserror::Error;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Flush interval in milliseconds (None for immediate flush)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "nexa_kv.db".to_string(),
            cache_capacity: 8 * 1024 * 1024,
            flush_every_ms: Some(500),
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Key-value store implementation
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl KvStore {
    /// Create a new key-value store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let mut db_config = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity);

        if let Some(ms) = config.flush_every_ms {
            db_config = db_config.flush_every_ms(Some(ms));
        }

        let db = db_config.open()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Create an in-memory key-value store (for testing)
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a value by key
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value by key
    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.db.insert(key.as_bytes(), bytes)?;
        Ok(())
    }

    /// Remove a value by key
    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.db.contains_key(key.as_bytes())?)
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let kv = KvStore::in_memory().unwrap();

        kv.set("test_key", &"test_value".to_string()).unwrap();

        let value: Option<String> = kv.get("test_key").unwrap();
        assert_eq!(value, Some("test_value".to_string()));
    }

    #[test]
    fn test_get_nonexistent() {
        let kv = KvStore::in_memory().unwrap();
        let value: Option<String> = kv.get("nonexistent").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_remove() {
        let kv = KvStore::in_memory().unwrap();

        kv.set("key", &"value".to_string()).unwrap();
        assert!(kv.contains("key").unwrap());

        let removed = kv.remove("key").unwrap();
        assert!(removed);
        assert!(!kv.contains("key").unwrap());

        let removed_again = kv.remove("key").unwrap();
        assert!(!removed_again);
    }

    #[test]
    fn test_overwrite() {
        let kv = KvStore::in_memory().unwrap();

        kv.set("flag", &false).unwrap();
        kv.set("flag", &true).unwrap();

        let value: Option<bool> = kv.get("flag").unwrap();
        assert_eq!(value, Some(true));
    }

    #[test]
    fn test_persistence_across_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("kv.db").to_string_lossy().to_string();

        {
            let kv = KvStore::new(KvConfig::new(&path)).unwrap();
            kv.set("key", &42).unwrap();
            kv.flush().unwrap();
        }

        let kv = KvStore::new(KvConfig::new(&path)).unwrap();
        let value: Option<i32> = kv.get("key").unwrap();
        assert_eq!(value, Some(42));
    }

    #[test]
    fn test_config_builder() {
        let config = KvConfig::new("test.db")
            .cache_capacity(1024)
            .flush_every_ms(Some(1000));

        assert_eq!(config.path, "test.db");
        assert_eq!(config.cache_capacity, 1024);
        assert_eq!(config.flush_every_ms, Some(1000));
    }
}
