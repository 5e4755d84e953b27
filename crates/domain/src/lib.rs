#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod collection;
pub mod date;
pub mod error;
pub mod exercise;
pub mod heatmap;
pub mod measure;
pub mod name;
pub mod plan;
pub mod service;
pub mod statistics;
pub mod workout;

#[cfg(test)]
mod tests;

pub use collection::{Collection, Entity};
pub use date::{Plural, days_since, relative_label, start_of_week};
pub use error::{
    CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError,
};
pub use exercise::{
    Exercise, ExerciseID, ExerciseRepository, ExerciseService, UNKNOWN_EXERCISE, exercise_label,
};
pub use heatmap::{Heatmap, HeatmapCell, activity_heatmap, current_streak};
pub use measure::{Reps, RepsError, Seconds, SecondsError, Weight, WeightError};
pub use name::{Name, NameError};
pub use plan::{Color, ColorError, PlanExercise, PlanID, PlanRepository, PlanService, WorkoutPlan};
pub use service::Service;
pub use statistics::{
    ExerciseStats, MonthSummary, PersonalRecord, SetRecord, Summary, best_workout_for_exercise,
    estimated_one_rep_max, exercise_stats, last_workout_for_exercise, month_summary,
    personal_records, week_summary,
};
pub use workout::{
    WorkoutExercise, WorkoutID, WorkoutRecord, WorkoutRepository, WorkoutService, WorkoutSet,
};
