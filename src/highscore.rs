//! Best score tracking
//!
//! Persisted to a single store slot, read once when the engine is built and
//! written whenever the session beats it. Store trouble never stops play.

use crate::persistence::ScoreStore;

/// High score slot
pub struct HighScore {
    store: Box<dyn ScoreStore>,
}

impl HighScore {
    /// Store key for the best score
    pub const STORAGE_KEY: &'static str = "bjj-mini-game-high-score";

    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Stored best, or 0 if missing or unreadable
    pub fn load(&self) -> u32 {
        match self.store.load(Self::STORAGE_KEY) {
            Ok(Some(score)) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read high score ({}), starting at 0", e);
                0
            }
        }
    }

    /// Persist a new best; failures are logged and swallowed
    pub fn save(&mut self, score: u32) {
        match self.store.save(Self::STORAGE_KEY, score) {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(e) => log::warn!("Could not save high score {}: {}", score, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<u32>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn save(&mut self, _key: &str, _value: u32) -> Result<(), StoreError> {
            Err(StoreError::Write("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_load_existing() {
        let store = MemoryStore::with_raw(HighScore::STORAGE_KEY, "9");
        assert_eq!(HighScore::new(Box::new(store)).load(), 9);
    }

    #[test]
    fn test_load_missing_or_corrupt_is_zero() {
        assert_eq!(HighScore::new(Box::new(MemoryStore::new())).load(), 0);
        let store = MemoryStore::with_raw(HighScore::STORAGE_KEY, "abc");
        assert_eq!(HighScore::new(Box::new(store)).load(), 0);
    }

    #[test]
    fn test_broken_store_is_silent() {
        let mut slot = HighScore::new(Box::new(BrokenStore));
        assert_eq!(slot.load(), 0);
        slot.save(5);
    }
}
