//! Browser LocalStorage backend

use web_sys::Storage;

use super::{ScoreStore, StoreError, parse_stored};

/// Store backed by `window.localStorage`
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    /// Grab LocalStorage if the page has one (private mode may not)
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - high score will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        match storage.get_item(key) {
            Ok(Some(raw)) => parse_stored(&raw).map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(StoreError::Unavailable),
        }
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, &value.to_string())
            .map_err(|e| StoreError::Write(format!("{:?}", e)))
    }
}
