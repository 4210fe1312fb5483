//! Persisted key/value store
//!
//! Whole-value text records keyed by name. Adapters decide where the text
//! lives; typed access goes through [`read_record`] and [`write_record`].

pub mod file;
pub mod memory;
pub mod redis;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

use crate::config::{AppConfig, StoreBackend};
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Key holding the ordered list of named presets
pub const PRESETS_KEY: &str = "presets";
/// Key holding the single auto-save snapshot
pub const AUTO_SAVE_KEY: &str = "auto-save";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the whole value stored under `key`
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error
    fn delete(&self, key: &str) -> Result<()>;
}

/// Reads and decodes a record.
///
/// Unreadable or malformed records are logged and treated as absent so
/// callers fall back to their defaults.
pub fn read_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read persisted record");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding malformed persisted record");
            None
        }
    }
}

pub fn write_record<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.put(key, &raw)
}

/// Builds the store adapter selected by configuration
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => Arc::new(FileStore::open(config.data_dir.join(&config.profile))?),
        StoreBackend::Redis => Arc::new(RedisStore::connect(&config.redis_url, &config.profile)?),
    };
    Ok(store)
}
