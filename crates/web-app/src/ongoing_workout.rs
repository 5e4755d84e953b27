use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::KeyValueStore;

pub const KEY: &str = "ongoing workout";

/// Everything needed to resume an interrupted workout.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OngoingWorkout {
    pub plan: Option<SelectedPlan>,
    pub exercises: Vec<ExerciseDraft>,
    pub current_index: usize,
    /// Keyed by the position in `exercises`. Unresolved exercises have no entry.
    pub statuses: BTreeMap<usize, ExerciseStatus>,
    pub notes: String,
    pub saved_at: Option<DateTime<Utc>>,
}

impl OngoingWorkout {
    #[must_use]
    pub fn status(&self, idx: usize) -> Option<ExerciseStatus> {
        self.statuses.get(&idx).copied()
    }

    #[must_use]
    pub fn unresolved(&self) -> Vec<usize> {
        (0..self.exercises.len())
            .filter(|idx| !self.statuses.contains_key(idx))
            .collect()
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.statuses
            .values()
            .filter(|s| **s == ExerciseStatus::Completed)
            .count()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SelectedPlan {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    pub exercise_id: Uuid,
    pub name: String,
    pub uses_weight: bool,
    pub uses_duration: bool,
    pub notes: String,
    pub sets: Vec<SetDraft>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SetDraft {
    pub reps: Option<u32>,
    pub weight: Option<f32>,
    pub duration: Option<u32>,
    pub notes: String,
}

impl SetDraft {
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.reps.is_some_and(|r| r > 0)
            || self.weight.is_some_and(|w| w > 0.0)
            || self.duration.is_some_and(|d| d > 0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExerciseStatus {
    Completed,
    Skipped,
}

/// Best-effort persistence of the ongoing workout.
///
/// Storage failures are logged and otherwise ignored. A snapshot that cannot be read back is
/// treated as absent.
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&self, ongoing_workout: &OngoingWorkout) {
        let snapshot = OngoingWorkout {
            saved_at: Some(Utc::now()),
            ..ongoing_workout.clone()
        };
        let value = match serde_json::to_string(&snapshot) {
            Ok(value) => value,
            Err(err) => {
                error!("failed to serialize ongoing workout: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(KEY, &value) {
            error!("failed to save ongoing workout: {err}");
        }
    }

    #[must_use]
    pub fn load(&self) -> Option<OngoingWorkout> {
        let value = match self.store.get(KEY) {
            Ok(value) => value?,
            Err(err) => {
                error!("failed to load ongoing workout: {err}");
                return None;
            }
        };
        match serde_json::from_str(&value) {
            Ok(ongoing_workout) => Some(ongoing_workout),
            Err(err) => {
                warn!("discarding malformed ongoing workout: {err}");
                None
            }
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.store.remove(KEY) {
            error!("failed to clear ongoing workout: {err}");
        }
    }
}
