//! Aggregations over the workout history.
//!
//! All functions are pure and never fail. Records are always scanned in chronological order,
//! so that ties are consistently resolved in favor of the earliest occurrence, independent of
//! the order in which the records were fetched.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::{ExerciseID, Reps, Weight, WorkoutID, WorkoutRecord, WorkoutSet, date::start_of_week};

/// Length of the trailing window used for the month summary.
pub const MONTH_DAYS: u64 = 30;

/// Estimated one-repetition maximum according to the Epley formula.
#[must_use]
pub fn estimated_one_rep_max(weight: Weight, reps: Reps) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let reps = u32::from(reps) as f32;
    f32::from(weight) * (1.0 + reps / 30.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalRecord {
    pub exercise_id: ExerciseID,
    pub workout_id: WorkoutID,
    pub workout_date: NaiveDateTime,
    pub weight: Weight,
    pub reps: Reps,
    pub estimated_max: f32,
}

/// Best set per exercise, ranked by estimated one-repetition maximum (highest first).
///
/// Only sets with a positive weight and positive reps are considered. Exercises without such a
/// set are not part of the result.
#[must_use]
pub fn personal_records(records: &[WorkoutRecord]) -> Vec<PersonalRecord> {
    let mut best: BTreeMap<ExerciseID, PersonalRecord> = BTreeMap::new();

    for record in chronological(records) {
        for exercise in &record.exercises {
            for set in &exercise.sets {
                let (Some(weight), Some(reps)) = (set.weight, set.reps) else {
                    continue;
                };
                if weight.is_zero() || reps.is_zero() {
                    continue;
                }
                let estimated_max = estimated_one_rep_max(weight, reps);
                if best
                    .get(&exercise.exercise_id)
                    .is_some_and(|pr| pr.estimated_max >= estimated_max)
                {
                    continue;
                }
                best.insert(
                    exercise.exercise_id,
                    PersonalRecord {
                        exercise_id: exercise.exercise_id,
                        workout_id: record.id,
                        workout_date: record.workout_date,
                        weight,
                        reps,
                        estimated_max,
                    },
                );
            }
        }
    }

    let mut result = best.into_values().collect::<Vec<_>>();
    result.sort_by(|a, b| b.estimated_max.total_cmp(&a.estimated_max));
    result
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary<'a> {
    pub count: usize,
    pub total_hours: f64,
    pub records: Vec<&'a WorkoutRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary<'a> {
    pub count: usize,
    pub total_hours: f64,
    pub total_volume: u64,
    pub records: Vec<&'a WorkoutRecord>,
}

/// Workouts since the most recent Sunday (inclusive).
#[must_use]
pub fn week_summary(records: &[WorkoutRecord], today: NaiveDate) -> Summary<'_> {
    let records = since(records, start_of_week(today));
    Summary {
        count: records.len(),
        total_hours: total_hours(&records),
        records,
    }
}

/// Workouts of the last 30 days (inclusive).
#[must_use]
pub fn month_summary(records: &[WorkoutRecord], today: NaiveDate) -> MonthSummary<'_> {
    let first = today.checked_sub_days(Days::new(MONTH_DAYS)).unwrap_or(today);
    let records = since(records, first);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_volume = records.iter().map(|r| r.volume()).sum::<f64>().round() as u64;
    MonthSummary {
        count: records.len(),
        total_hours: total_hours(&records),
        total_volume,
        records,
    }
}

/// Most recent workout containing the exercise.
#[must_use]
pub fn last_workout_for_exercise(
    records: &[WorkoutRecord],
    exercise_id: ExerciseID,
) -> Option<&WorkoutRecord> {
    chronological(records)
        .into_iter()
        .filter(|r| r.contains(exercise_id))
        .fold(None, |last: Option<&WorkoutRecord>, r| match last {
            Some(l) if l.workout_date >= r.workout_date => Some(l),
            _ => Some(r),
        })
}

/// Workout with the highest volume (weight × reps) for the exercise.
#[must_use]
pub fn best_workout_for_exercise(
    records: &[WorkoutRecord],
    exercise_id: ExerciseID,
) -> Option<&WorkoutRecord> {
    chronological(records)
        .into_iter()
        .filter(|r| r.contains(exercise_id))
        .fold(None, |best: Option<(&WorkoutRecord, f64)>, r| {
            let volume = r.volume_of(exercise_id);
            match best {
                Some((b, best_volume)) if best_volume >= volume => Some((b, best_volume)),
                _ => Some((r, volume)),
            }
        })
        .map(|(r, _)| r)
}

/// A set together with the workout it was performed in.
#[derive(Debug, Clone, PartialEq)]
pub struct SetRecord {
    pub workout_id: WorkoutID,
    pub workout_date: NaiveDateTime,
    pub set: WorkoutSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStats {
    pub total_workouts: usize,
    pub max_reps: Option<SetRecord>,
    pub max_weight: Option<SetRecord>,
}

/// Usage statistics of an exercise.
///
/// `None` if no workout contains the exercise. The maximum sets are `None` if no set of the
/// exercise has the respective value recorded.
#[must_use]
pub fn exercise_stats(records: &[WorkoutRecord], exercise_id: ExerciseID) -> Option<ExerciseStats> {
    let records = chronological(records)
        .into_iter()
        .filter(|r| r.contains(exercise_id))
        .collect::<Vec<_>>();

    if records.is_empty() {
        return None;
    }

    let mut max_reps: Option<SetRecord> = None;
    let mut max_weight: Option<SetRecord> = None;

    for record in &records {
        for set in record.sets_of(exercise_id) {
            if let Some(reps) = set.reps {
                if max_reps
                    .as_ref()
                    .is_none_or(|m| m.set.reps.is_some_and(|r| reps > r))
                {
                    max_reps = Some(set_record(record, set));
                }
            }
            if let Some(weight) = set.weight {
                if max_weight
                    .as_ref()
                    .is_none_or(|m| m.set.weight.is_some_and(|w| weight > w))
                {
                    max_weight = Some(set_record(record, set));
                }
            }
        }
    }

    Some(ExerciseStats {
        total_workouts: records.len(),
        max_reps,
        max_weight,
    })
}

fn set_record(record: &WorkoutRecord, set: &WorkoutSet) -> SetRecord {
    SetRecord {
        workout_id: record.id,
        workout_date: record.workout_date,
        set: set.clone(),
    }
}

// Stable, so records on the same date keep their relative order.
fn chronological(records: &[WorkoutRecord]) -> Vec<&WorkoutRecord> {
    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|r| r.workout_date);
    sorted
}

fn since(records: &[WorkoutRecord], first: NaiveDate) -> Vec<&WorkoutRecord> {
    chronological(records)
        .into_iter()
        .filter(|r| r.workout_date.date() >= first)
        .collect()
}

fn total_hours(records: &[&WorkoutRecord]) -> f64 {
    let minutes = records.iter().map(|r| r.estimated_minutes()).sum::<f64>();
    (minutes / 60.0 * 10.0).round() / 10.0
}
