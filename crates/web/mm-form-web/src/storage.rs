//! Browser local storage behind [`PreferenceStore`]

use crate::dom::describe;
use mm_form_core::{FormError, FormResult, MemoryStore, PreferenceStore};
use tracing::debug;
use web_sys::Storage;

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open `window.localStorage`; fails when storage is disabled
    pub fn open() -> FormResult<Self> {
        let window = web_sys::window().ok_or_else(|| FormError::storage("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| FormError::storage(describe(&e)))?
            .ok_or_else(|| FormError::storage("localStorage is unavailable"))?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> FormResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| FormError::storage(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> FormResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| FormError::storage(describe(&e)))
    }
}

/// Local storage when accessible, otherwise an in-memory store for this page
pub fn browser_store() -> Box<dyn PreferenceStore> {
    match LocalStorage::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            debug!(error = %e, "Falling back to in-memory preferences");
            Box::new(MemoryStore::new())
        }
    }
}
