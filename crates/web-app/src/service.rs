use std::collections::VecDeque;

use crate::{Settings, SettingsRepository, SettingsService, StoreError, log};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: log::Repository> log::Service for Service<R> {
    fn get_log_entries(&self) -> Result<VecDeque<log::Entry>, StoreError> {
        self.repository.read_entries()
    }

    fn add_log_entry(&self, entry: log::Entry) -> Result<(), StoreError> {
        self.repository.write_entry(entry)
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    fn get_settings(&self) -> Result<Settings, StoreError> {
        let result = self.repository.read_settings();
        if let Err(ref err) = result {
            ::log::error!("failed to get settings: {err}");
        }
        result
    }

    fn set_settings(&self, settings: Settings) -> Result<(), StoreError> {
        let result = self.repository.write_settings(settings);
        if let Err(ref err) = result {
            ::log::error!("failed to set settings: {err}");
        }
        result
    }
}
