use gloo_storage::Storage as _;
use ironlog_web_app::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;

/// Browser local storage.
///
/// Values are stored verbatim. Serialization is up to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(store_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| match store_error(err) {
                StoreError::Other(message) if message.contains("QuotaExceeded") => {
                    StoreError::QuotaExceeded
                }
                err => err,
            })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        gloo_storage::LocalStorage::raw()
            .remove_item(key)
            .map_err(store_error)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn store_error(err: JsValue) -> StoreError {
    StoreError::Other(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
