//! Single-slot integer persistence
//!
//! The game persists exactly one number (the high score). Stores report
//! failures through [`StoreError`]; callers degrade to "nothing stored".

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("stored value '{0}' is not a non-negative integer")]
    Corrupt(String),
    #[error("failed to write value: {0}")]
    Write(String),
}

/// Get/set an integer under a fixed key
pub trait ScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError>;
    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

/// Parse a stored decimal string
pub fn parse_stored(raw: &str) -> Result<u32, StoreError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| StoreError::Corrupt(raw.to_string()))
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw stored string, as if written by an earlier session
    pub fn with_raw(key: &str, raw: &str) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.to_string(), raw.to_string());
        store
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError> {
        self.slots.get(key).map(|raw| parse_stored(raw)).transpose()
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("k"), Ok(None));
        store.save("k", 17).unwrap();
        assert_eq!(store.load("k"), Ok(Some(17)));
        assert_eq!(store.load("other"), Ok(None));
    }

    #[test]
    fn test_corrupt_value() {
        let store = MemoryStore::with_raw("k", "NaN");
        assert_eq!(store.load("k"), Err(StoreError::Corrupt("NaN".to_string())));
        assert_eq!(parse_stored(" 42 "), Ok(42));
        assert!(parse_stored("-3").is_err());
    }
}
