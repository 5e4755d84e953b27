use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

use crate::{KeyValueStore, StoreError};

pub const KEY: &str = "log";
pub const MAX_ENTRIES: usize = 100;

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

#[allow(clippy::missing_errors_doc)]
pub trait Service {
    fn get_log_entries(&self) -> Result<VecDeque<Entry>, StoreError>;
    fn add_log_entry(&self, entry: Entry) -> Result<(), StoreError>;
}

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, StoreError>;
    fn write_entry(&self, entry: Entry) -> Result<(), StoreError>;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Keeps the most recent log entries as a JSON list under a single key.
pub struct KeyValueLog<S> {
    store: S,
}

impl<S> KeyValueLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore + Send + Sync + 'static> Repository for KeyValueLog<S> {
    fn read_entries(&self) -> Result<VecDeque<Entry>, StoreError> {
        match self.store.get(KEY)? {
            Some(value) => {
                serde_json::from_str(&value).map_err(|err| StoreError::Other(err.to_string()))
            }
            None => Ok(VecDeque::new()),
        }
    }

    fn write_entry(&self, entry: Entry) -> Result<(), StoreError> {
        // A corrupted log is replaced instead of blocking all further entries.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.push_back(entry);
        while entries.len() > MAX_ENTRIES {
            entries.pop_front();
        }
        let value =
            serde_json::to_string(&entries).map_err(|err| StoreError::Other(err.to_string()))?;
        self.store.set(KEY, &value)
    }
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(repository: Arc<Mutex<dyn Repository>>) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(repository);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();

        #[cfg(target_arch = "wasm32")]
        match record.level() {
            Level::Error => gloo_console::error!(message.clone()),
            Level::Warn => gloo_console::warn!(message.clone()),
            Level::Info => gloo_console::info!(message.clone()),
            Level::Debug | Level::Trace => gloo_console::debug!(message.clone()),
        }

        let Ok(log) = LOG.lock() else {
            return;
        };
        if let Some(repository) = log.as_ref() {
            if let Ok(repository) = repository.lock() {
                let _ = repository.write_entry(Entry {
                    time: Local::now().format("%b %d %H:%M:%S").to_string(),
                    level: record.level(),
                    message,
                });
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::MemoryStore;

    use super::*;

    fn entry(message: &str) -> Entry {
        Entry {
            time: String::from("May 15 18:00:00"),
            level: Level::Warn,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_key_value_log() {
        let log = KeyValueLog::new(MemoryStore::default());
        assert_eq!(log.read_entries(), Ok(VecDeque::new()));

        log.write_entry(entry("a")).unwrap();
        log.write_entry(entry("b")).unwrap();

        assert_eq!(
            log.read_entries(),
            Ok(VecDeque::from([entry("a"), entry("b")]))
        );
    }

    #[test]
    fn test_key_value_log_truncation() {
        let log = KeyValueLog::new(MemoryStore::default());
        for i in 0..=MAX_ENTRIES {
            log.write_entry(entry(&i.to_string())).unwrap();
        }

        let entries = log.read_entries().unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries.front(), Some(&entry("1")));
        assert_eq!(entries.back(), Some(&entry(&MAX_ENTRIES.to_string())));
    }

    #[test]
    fn test_key_value_log_replaces_corrupted_log() {
        let store = MemoryStore::default();
        store.set(KEY, "[{").unwrap();
        let log = KeyValueLog::new(store);

        assert!(log.read_entries().is_err());
        log.write_entry(entry("a")).unwrap();
        assert_eq!(log.read_entries(), Ok(VecDeque::from([entry("a")])));
    }

    #[test]
    fn test_entry_level_serialization() {
        let json = serde_json::to_string(&entry("a")).unwrap();
        assert_eq!(
            json,
            r#"{"time":"May 15 18:00:00","level":"Warn","message":"a"}"#
        );
    }
}
