use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseID, PlanID, ReadError, Reps, Seconds, UpdateError, Weight,
};

/// Fallback duration per exercise entry if the record timestamps are unusable.
pub const FALLBACK_MINUTES_PER_EXERCISE: f64 = 3.0;
/// Range of plausible measured session durations in minutes.
pub const MEASURED_MINUTES: std::ops::RangeInclusive<f64> = 5.0..=180.0;

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn create_workout(
        &self,
        plan_id: Option<PlanID>,
        workout_date: NaiveDateTime,
        notes: Option<String>,
        exercises: Vec<WorkoutExercise>,
    ) -> Result<WorkoutRecord, CreateError>;
    async fn modify_workout(
        &self,
        id: WorkoutID,
        notes: Option<Option<String>>,
        exercises: Option<Vec<WorkoutExercise>>,
    ) -> Result<WorkoutRecord, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

/// Creating a workout stores the record together with all its exercises and sets.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn create_workout(
        &self,
        plan_id: Option<PlanID>,
        workout_date: NaiveDateTime,
        notes: Option<String>,
        exercises: Vec<WorkoutExercise>,
    ) -> Result<WorkoutRecord, CreateError>;
    async fn modify_workout(
        &self,
        id: WorkoutID,
        notes: Option<Option<String>>,
        exercises: Option<Vec<WorkoutExercise>>,
    ) -> Result<WorkoutRecord, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub id: WorkoutID,
    pub plan_id: Option<PlanID>,
    pub workout_date: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub exercises: Vec<WorkoutExercise>,
}

impl WorkoutRecord {
    #[must_use]
    pub fn exercise_ids(&self) -> BTreeSet<ExerciseID> {
        self.exercises.iter().map(|e| e.exercise_id).collect()
    }

    #[must_use]
    pub fn contains(&self, exercise_id: ExerciseID) -> bool {
        self.exercises.iter().any(|e| e.exercise_id == exercise_id)
    }

    /// Sets of an exercise in the order they were logged.
    pub fn sets_of(&self, exercise_id: ExerciseID) -> impl Iterator<Item = &WorkoutSet> {
        self.exercises
            .iter()
            .filter(move |e| e.exercise_id == exercise_id)
            .flat_map(|e| e.sets.iter())
    }

    /// Sum of weight × reps over all sets.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(WorkoutSet::volume)
            .sum()
    }

    /// Sum of weight × reps over the sets of one exercise.
    #[must_use]
    pub fn volume_of(&self, exercise_id: ExerciseID) -> f64 {
        self.sets_of(exercise_id).map(WorkoutSet::volume).sum()
    }

    /// Session length derived from the record timestamps.
    ///
    /// Measured durations outside of 5 to 180 minutes are considered bogus (e.g., a record
    /// edited days later), in which case 3 minutes per exercise are assumed.
    #[must_use]
    pub fn estimated_minutes(&self) -> f64 {
        if let (Some(created_at), Some(updated_at)) = (self.created_at, self.updated_at) {
            #[allow(clippy::cast_precision_loss)]
            let minutes = (updated_at - created_at).num_milliseconds() as f64 / 60_000.0;
            if MEASURED_MINUTES.contains(&minutes) {
                return minutes;
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let exercises = self.exercises.len() as f64;
        FALLBACK_MINUTES_PER_EXERCISE * exercises
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub exercise_id: ExerciseID,
    pub order_index: u32,
    pub notes: Option<String>,
    pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSet {
    pub set_number: u32,
    pub reps: Option<Reps>,
    pub weight: Option<Weight>,
    pub duration: Option<Seconds>,
    pub notes: Option<String>,
}

impl WorkoutSet {
    /// A set without any logged reps, weight or duration only serves as a placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.reps.is_none_or(Reps::is_zero)
            && self.weight.is_none_or(Weight::is_zero)
            && self.duration.is_none_or(Seconds::is_zero)
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        let reps = self.reps.map_or(0, u32::from);
        let weight = self.weight.map_or(0.0, f32::from);
        f64::from(weight) * f64::from(reps)
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::tests::data::{dt, set, workout, workout_exercise};

    use super::*;

    #[rstest]
    #[case::empty(None, None, None, true)]
    #[case::zeros(Some(0), Some(0.0), Some(0), true)]
    #[case::reps(Some(5), None, None, false)]
    #[case::weight(None, Some(20.0), None, false)]
    #[case::duration(None, None, Some(30), false)]
    #[case::zero_reps_with_weight(Some(0), Some(20.0), None, false)]
    fn test_workout_set_is_placeholder(
        #[case] reps: Option<u32>,
        #[case] weight: Option<f32>,
        #[case] duration: Option<u32>,
        #[case] expected: bool,
    ) {
        assert_eq!(set(1, reps, weight, duration).is_placeholder(), expected);
    }

    #[rstest]
    #[case(Some(10), Some(50.0), 500.0)]
    #[case(Some(10), None, 0.0)]
    #[case(None, Some(50.0), 0.0)]
    #[case(Some(3), Some(102.5), 307.5)]
    fn test_workout_set_volume(
        #[case] reps: Option<u32>,
        #[case] weight: Option<f32>,
        #[case] expected: f64,
    ) {
        assert_approx_eq!(set(1, reps, weight, None).volume(), expected);
    }

    #[test]
    fn test_workout_record_volume() {
        let record = workout(
            1,
            dt(2024, 3, 1, 18, 0),
            vec![
                workout_exercise(
                    1,
                    vec![
                        set(1, Some(10), Some(50.0), None),
                        set(2, Some(8), Some(55.0), None),
                    ],
                ),
                workout_exercise(2, vec![set(1, Some(12), None, None)]),
                workout_exercise(1, vec![set(1, Some(5), Some(60.0), None)]),
            ],
        );
        assert_approx_eq!(record.volume(), 1240.0);
        assert_approx_eq!(record.volume_of(1.into()), 1240.0);
        assert_approx_eq!(record.volume_of(2.into()), 0.0);
        assert_approx_eq!(record.volume_of(3.into()), 0.0);
        assert_eq!(record.sets_of(1.into()).count(), 3);
        assert!(record.contains(2.into()));
        assert!(!record.contains(3.into()));
        assert_eq!(record.exercise_ids(), BTreeSet::from([1.into(), 2.into()]));
    }

    #[rstest]
    #[case::measured(Some(45), 45.0)]
    #[case::lower_bound(Some(5), 5.0)]
    #[case::upper_bound(Some(180), 180.0)]
    #[case::too_short(Some(4), 9.0)]
    #[case::too_long(Some(181), 9.0)]
    #[case::negative(Some(-30), 9.0)]
    #[case::missing(None, 9.0)]
    fn test_workout_record_estimated_minutes(#[case] minutes: Option<i64>, #[case] expected: f64) {
        let mut record = workout(
            1,
            dt(2024, 3, 1, 18, 0),
            vec![
                workout_exercise(1, vec![]),
                workout_exercise(2, vec![]),
                workout_exercise(3, vec![]),
            ],
        );
        if let Some(minutes) = minutes {
            let created_at = record.workout_date.and_utc();
            record.created_at = Some(created_at);
            record.updated_at = Some(created_at + Duration::minutes(minutes));
        }
        assert_approx_eq!(record.estimated_minutes(), expected);
    }

    #[test]
    fn test_workout_record_estimated_minutes_only_created() {
        let mut record = workout(1, dt(2024, 3, 1, 18, 0), vec![workout_exercise(1, vec![])]);
        record.created_at = Some(record.workout_date.and_utc());
        assert_approx_eq!(record.estimated_minutes(), 3.0);
    }

    #[test]
    fn test_workout_id_nil() {
        assert!(WorkoutID::nil().is_nil());
        assert_eq!(WorkoutID::nil(), WorkoutID::default());
    }
}
