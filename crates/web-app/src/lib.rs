#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod log;
pub mod ongoing_workout;
pub mod service;
pub mod settings;
pub mod store;
pub mod wizard;

pub use crate::log::KeyValueLog;
pub use ongoing_workout::{
    ExerciseDraft, ExerciseStatus, OngoingWorkout, SelectedPlan, SessionStore, SetDraft,
};
pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService, Theme};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use wizard::{SetField, Step, WizardError, WorkoutWizard};
