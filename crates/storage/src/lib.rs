#![warn(clippy::pedantic)]

use std::sync::{Arc, Mutex};

use ironlog_web_app::KeyValueLog;
use log::SetLoggerError;

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;

pub use local_storage::LocalStorage;

/// Persists log entries in the browser's local storage.
///
/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init_log() -> Result<(), SetLoggerError> {
    ironlog_web_app::log::init(Arc::new(Mutex::new(KeyValueLog::new(LocalStorage))))?;
    log::debug!("logger initialized");
    Ok(())
}
