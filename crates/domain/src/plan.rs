use std::collections::BTreeSet;

use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseID, Name, ReadError, UpdateError, ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait PlanService {
    async fn get_plans(&self) -> Result<Vec<WorkoutPlan>, ReadError>;
    async fn create_plan(
        &self,
        name: Name,
        color: Color,
        description: Option<String>,
        exercises: Vec<PlanExercise>,
    ) -> Result<WorkoutPlan, CreateError>;
    async fn modify_plan(
        &self,
        id: PlanID,
        name: Option<Name>,
        color: Option<Color>,
        description: Option<Option<String>>,
        exercises: Option<Vec<PlanExercise>>,
    ) -> Result<WorkoutPlan, UpdateError>;
    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;

    async fn validate_plan_name(&self, name: &str, id: PlanID) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_plans().await {
                Ok(plans) => {
                    if plans.iter().all(|p| p.id == id || p.name != name) {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }

    fn validate_color(&self, color: &str) -> Result<Color, ValidationError> {
        Color::new(color).map_err(|err| ValidationError::Other(err.into()))
    }
}

#[allow(async_fn_in_trait)]
pub trait PlanRepository {
    async fn read_plans(&self) -> Result<Vec<WorkoutPlan>, ReadError>;
    async fn create_plan(
        &self,
        name: Name,
        color: Color,
        description: Option<String>,
        exercises: Vec<PlanExercise>,
    ) -> Result<WorkoutPlan, CreateError>;
    async fn modify_plan(
        &self,
        id: PlanID,
        name: Option<Name>,
        color: Option<Color>,
        description: Option<Option<String>>,
        exercises: Option<Vec<PlanExercise>>,
    ) -> Result<WorkoutPlan, UpdateError>;
    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    pub id: PlanID,
    pub name: Name,
    pub color: Color,
    pub description: Option<String>,
    pub exercises: Vec<PlanExercise>,
}

impl WorkoutPlan {
    #[must_use]
    pub fn exercise_ids(&self) -> BTreeSet<ExerciseID> {
        self.exercises.iter().map(|e| e.exercise_id).collect()
    }

    /// Plan exercises in logging order.
    #[must_use]
    pub fn ordered_exercises(&self) -> Vec<&PlanExercise> {
        let mut exercises = self.exercises.iter().collect::<Vec<_>>();
        exercises.sort_by_key(|e| e.order_index);
        exercises
    }

    pub fn add_exercise(&mut self, exercise_id: ExerciseID, suggested_sets: u32) {
        self.normalize_order();
        self.exercises.push(PlanExercise {
            exercise_id,
            order_index: u32::try_from(self.exercises.len()).unwrap_or(u32::MAX),
            suggested_sets,
            notes: None,
        });
    }

    /// Returns `false` if `position` is out of bounds.
    pub fn remove_exercise(&mut self, position: usize) -> bool {
        self.normalize_order();
        if position >= self.exercises.len() {
            return false;
        }
        self.exercises.remove(position);
        self.renumber();
        true
    }

    /// Move the exercise at `from` to `to`, shifting the exercises in between.
    ///
    /// Returns `false` if either position is out of bounds.
    pub fn move_exercise(&mut self, from: usize, to: usize) -> bool {
        self.normalize_order();
        let len = self.exercises.len();
        if from >= len || to >= len {
            return false;
        }
        let exercise = self.exercises.remove(from);
        self.exercises.insert(to, exercise);
        self.renumber();
        true
    }

    /// Arrange the exercises by their order index, then renumber them.
    fn normalize_order(&mut self) {
        self.exercises.sort_by_key(|e| e.order_index);
        self.renumber();
    }

    // Positions are authoritative here, stale order indices are overwritten.
    fn renumber(&mut self) {
        for (i, exercise) in self.exercises.iter_mut().enumerate() {
            exercise.order_index = u32::try_from(i).unwrap_or(u32::MAX);
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlanID(Uuid);

impl PlanID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for PlanID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for PlanID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanExercise {
    pub exercise_id: ExerciseID,
    pub order_index: u32,
    pub suggested_sets: u32,
    pub notes: Option<String>,
}

/// Display color of a plan as `#rrggbb`.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    pub fn new(value: &str) -> Result<Self, ColorError> {
        let value = value.trim();
        match value.strip_prefix('#') {
            Some(hex) if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                Ok(Self(value.to_ascii_lowercase()))
            }
            _ => Err(ColorError::Invalid(value.to_string())),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(String::from("#3b82f6"))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ColorError {
    #[error("Invalid color \"{0}\", expected #rrggbb")]
    Invalid(String),
}
