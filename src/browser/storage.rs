//! localStorage adapter

use web_sys::Storage;

use crate::error::{describe_js, WidgetError, WidgetResult};
use crate::ports::KeyValueStore;

pub struct LocalStore;

impl LocalStore {
    // Private browsing or a sandboxed iframe can refuse access
    fn storage() -> WidgetResult<Storage> {
        web_sys::window()
            .ok_or_else(|| WidgetError::Storage("no window".into()))?
            .local_storage()
            .map_err(|e| WidgetError::Storage(describe_js(&e)))?
            .ok_or_else(|| WidgetError::Storage("localStorage unavailable".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        match Self::storage().and_then(|s| s.get_item(key).map_err(|e| WidgetError::Storage(describe_js(&e)))) {
            Ok(value) => value,
            Err(e) => {
                log::warn!(target: "storage", "reading {}: {}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> WidgetResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| WidgetError::Storage(describe_js(&e)))
    }
}
