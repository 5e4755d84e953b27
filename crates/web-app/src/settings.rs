use log::error;
use serde::{Deserialize, Serialize};

use crate::{KeyValueStore, StoreError};

pub const KEY: &str = "settings";

#[allow(clippy::missing_errors_doc)]
pub trait SettingsService {
    fn get_settings(&self) -> Result<Settings, StoreError>;
    fn set_settings(&self, settings: Settings) -> Result<(), StoreError>;
}

#[allow(clippy::missing_errors_doc)]
pub trait SettingsRepository {
    fn read_settings(&self) -> Result<Settings, StoreError>;
    fn write_settings(&self, settings: Settings) -> Result<(), StoreError>;
}

impl<S: KeyValueStore> SettingsRepository for S {
    fn read_settings(&self) -> Result<Settings, StoreError> {
        match self.get(KEY)? {
            Some(value) => {
                serde_json::from_str(&value).map_err(|err| StoreError::Other(err.to_string()))
            }
            None => Ok(Settings::default()),
        }
    }

    fn write_settings(&self, settings: Settings) -> Result<(), StoreError> {
        let value =
            serde_json::to_string(&settings).map_err(|err| StoreError::Other(err.to_string()))?;
        self.set(KEY, &value)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub show_volume: bool,
    pub show_heatmap: bool,
}

impl Settings {
    #[must_use]
    pub fn current_theme(&self) -> Theme {
        match self.theme {
            Theme::System => preferred_theme(),
            Theme::Light | Theme::Dark => self.theme,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            show_volume: true,
            show_heatmap: true,
        }
    }
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter,
)]
pub enum Theme {
    System,
    Light,
    Dark,
}

#[cfg(target_arch = "wasm32")]
fn preferred_theme() -> Theme {
    let Some(window) = web_sys::window() else {
        error!("failed to access window to determine preferred color scheme");
        return Theme::Light;
    };
    match window.match_media("(prefers-color-scheme: dark)") {
        Ok(Some(media_query_list)) => {
            if media_query_list.matches() {
                Theme::Dark
            } else {
                Theme::Light
            }
        }
        Ok(None) => {
            error!("failed to determine preferred color scheme");
            Theme::Light
        }
        Err(_) => {
            error!("failed to match media to determine preferred color scheme");
            Theme::Light
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn preferred_theme() -> Theme {
    error!("no window to determine preferred color scheme");
    Theme::Light
}
