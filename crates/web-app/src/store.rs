use std::{collections::BTreeMap, sync::Mutex};

/// Persistent string storage, e.g., the browser's local storage.
#[allow(clippy::missing_errors_doc)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("{0}")]
    Other(String),
}

/// Volatile store for hosts without persistent storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        entries.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::default();
        assert_eq!(store.get("a"), Ok(None));
        assert_eq!(store.set("a", "1"), Ok(()));
        assert_eq!(store.set("a", "2"), Ok(()));
        assert_eq!(store.get("a"), Ok(Some(String::from("2"))));
        assert_eq!(store.remove("a"), Ok(()));
        assert_eq!(store.remove("a"), Ok(()));
        assert_eq!(store.get("a"), Ok(None));
    }

    #[test]
    fn test_store_by_reference() {
        let store = MemoryStore::default();
        let by_ref = &store;
        by_ref.set("a", "1").unwrap();
        assert_eq!(store.get("a"), Ok(Some(String::from("1"))));
    }
}
