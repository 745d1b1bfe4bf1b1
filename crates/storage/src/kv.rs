//! Secure key-value store for device settings
//!
//! This module provides the persisted key-value storage the app keeps its
//! flags, theme preference and session cookie in. [`KvStore`] is backed by
//! sled; everything above it talks to the object-safe [`SecureStore`] trait so
//! stores can be swapped or faked in tests.

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

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Stored bytes are not valid UTF-8
    #[error("Invalid encoding for key: {0}")]
    Encoding(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Minimal string store contract, shaped like a mobile secure store
///
/// Values are opaque strings. Typed access goes through [`DeviceStore`].
pub trait SecureStore: Send + Sync {
    /// Read a value, `None` when the key has never been written
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value, returning whether it existed
    fn delete_item(&self, key: &str) -> Result<bool>;
}

/// Check that a key only uses characters a secure store accepts
///
/// Keys must be non-empty and made of ASCII alphanumerics, `.`, `-`, `_` or `:`.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':'));

    if valid {
        Ok(())
    } else {
        Err(KvError::InvalidKey(key.to_string()))
    }
}

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Background flush interval in milliseconds; `None` disables background
    /// flushing, leaving it to [`KvStore::flush`] and drop
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "starter_kv.db".to_string(),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            use_compression: true,
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

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set the background flush interval; `None` disables it
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Sled-backed key-value store
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl KvStore {
    /// Open (or create) a store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let db = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression)
            .flush_every_ms(config.flush_every_ms)
            .open()?;
        tracing::debug!(path = %config.path, "opened key-value store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create an in-memory key-value store (for testing)
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

impl SecureStore for KvStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|_| KvError::Encoding(key.to_string())),
            None => Ok(None),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    fn delete_item(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }
}

/// Typed, scoped view over a [`SecureStore`] for device-level settings
///
/// Keys are stored as `<scope>:<key>` with JSON-encoded values.
#[derive(Clone)]
pub struct DeviceStore {
    store: Arc<dyn SecureStore>,
    scope: String,
}

impl DeviceStore {
    /// Create a device store using the default `device` scope
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self::with_scope(store, "device")
    }

    /// Create a device store with a custom scope (e.g. the app's storage prefix)
    pub fn with_scope(store: Arc<dyn SecureStore>, scope: impl Into<String>) -> Self {
        Self { store, scope: scope.into() }
    }

    /// The scope prepended to every key
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn scoped_key(&self, key: &str) -> String {
        format!("{}:{}", self.scope, key)
    }

    /// Get a device-level value
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.store.get_item(&self.scoped_key(key))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a device-level value
    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string(value)?;
        self.store.set_item(&self.scoped_key(key), &raw)
    }

    /// Read the raw string stored for a key
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.store.get_item(&self.scoped_key(key))
    }

    /// Write a raw string without JSON encoding
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.store.set_item(&self.scoped_key(key), value)
    }

    /// Remove a device-level value
    pub fn remove(&self, key: &str) -> Result<bool> {
        self.store.delete_item(&self.scoped_key(key))
    }

    /// Check if a device-level key exists
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.store.get_item(&self.scoped_key(key))?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        count: i32,
    }

    fn device_store() -> (Arc<KvStore>, DeviceStore) {
        let kv = Arc::new(KvStore::in_memory().unwrap());
        let device = DeviceStore::new(kv.clone());
        (kv, device)
    }

    #[test]
    fn test_get_nonexistent() {
        let kv = KvStore::in_memory().unwrap();
        assert_eq!(kv.get_item("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_secure_store_round_trip_raw_strings() {
        let kv = KvStore::in_memory().unwrap();

        kv.set_item("theme-mode", "dark").unwrap();
        assert_eq!(kv.get_item("theme-mode").unwrap(), Some("dark".to_string()));

        assert!(kv.delete_item("theme-mode").unwrap());
        assert!(!kv.delete_item("theme-mode").unwrap());
        assert_eq!(kv.get_item("theme-mode").unwrap(), None);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let (_, device) = device_store();
        let kv = KvStore::in_memory().unwrap();

        assert!(matches!(kv.set_item("", "x"), Err(KvError::InvalidKey(_))));
        assert!(matches!(kv.set_item("has space", "x"), Err(KvError::InvalidKey(_))));
        assert!(matches!(device.set("slash/key", &1), Err(KvError::InvalidKey(_))));
        assert!(validate_key("starter:onboarding-completed").is_ok());
    }

    #[test]
    fn test_device_store_typed_values() {
        let (kv, device) = device_store();

        device.set("onboarding-completed", &true).unwrap();

        let value: Option<bool> = device.get("onboarding-completed").unwrap();
        assert_eq!(value, Some(true));
        assert!(device.contains("onboarding-completed").unwrap());

        // Visible to the underlying store under the scoped key
        assert_eq!(kv.get_item("device:onboarding-completed").unwrap(), Some("true".to_string()));
    }

    #[test]
    fn test_device_store_custom_scope_and_raw() {
        let kv = Arc::new(KvStore::in_memory().unwrap());
        let device = DeviceStore::with_scope(kv.clone(), "starter");

        device.set_raw("cookie", "session=abc").unwrap();

        assert_eq!(device.scope(), "starter");
        assert_eq!(device.get_raw("cookie").unwrap(), Some("session=abc".to_string()));
        assert!(device.remove("cookie").unwrap());
        assert!(!device.contains("cookie").unwrap());
    }

    #[test]
    fn test_device_store_rejects_malformed_json() {
        let (kv, device) = device_store();
        kv.set_item("device:broken", "{not json").unwrap();

        let result: Result<Option<TestData>> = device.get("broken");
        assert!(matches!(result, Err(KvError::Serialization(_))));
    }

    #[test]
    fn test_persistence_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.db").to_string_lossy().to_string();

        {
            let kv = KvStore::new(KvConfig::new(path.clone()).flush_every_ms(None)).unwrap();
            kv.set_item("device:theme-mode", "dark").unwrap();
            kv.flush().unwrap();
        }

        let kv = KvStore::new(KvConfig::new(path)).unwrap();
        assert_eq!(kv.get_item("device:theme-mode").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_config_builder() {
        let config = KvConfig::new("custom.db")
            .cache_capacity(1024)
            .use_compression(false)
            .flush_every_ms(None);

        assert_eq!(config.path, "custom.db");
        assert_eq!(config.cache_capacity, 1024);
        assert!(!config.use_compression);
        assert_eq!(config.flush_every_ms, None);
    }
}
