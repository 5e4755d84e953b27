use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    Exercise, Name, Reps, Seconds, WorkoutExercise, WorkoutID, WorkoutRecord, WorkoutSet, Weight,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn dt(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, min, 0).unwrap()
}

pub fn exercise(id: u128, name: &str, uses_weight: bool, uses_duration: bool) -> Exercise {
    Exercise {
        id: id.into(),
        name: Name::new(name).unwrap(),
        description: None,
        uses_weight,
        uses_duration,
    }
}

pub fn set(
    set_number: u32,
    reps: Option<u32>,
    weight: Option<f32>,
    duration: Option<u32>,
) -> WorkoutSet {
    WorkoutSet {
        set_number,
        reps: reps.map(|r| Reps::new(r).unwrap()),
        weight: weight.map(|w| Weight::new(w).unwrap()),
        duration: duration.map(|d| Seconds::new(d).unwrap()),
        notes: None,
    }
}

pub fn workout_exercise(exercise_id: u128, sets: Vec<WorkoutSet>) -> WorkoutExercise {
    WorkoutExercise {
        exercise_id: exercise_id.into(),
        order_index: 0,
        notes: None,
        sets,
    }
}

pub fn workout(
    id: u128,
    workout_date: NaiveDateTime,
    exercises: Vec<WorkoutExercise>,
) -> WorkoutRecord {
    WorkoutRecord {
        id: WorkoutID::from(id),
        plan_id: None,
        workout_date,
        notes: None,
        created_at: None,
        updated_at: None,
        exercises: exercises
            .into_iter()
            .enumerate()
            .map(|(i, mut e)| {
                e.order_index = u32::try_from(i).unwrap();
                e
            })
            .collect(),
    }
}

/// Workout with a single set of the given exercise.
pub fn single_set_workout(
    id: u128,
    workout_date: NaiveDateTime,
    exercise_id: u128,
    reps: Option<u32>,
    weight: Option<f32>,
) -> WorkoutRecord {
    workout(
        id,
        workout_date,
        vec![workout_exercise(
            exercise_id,
            vec![set(1, reps, weight, None)],
        )],
    )
}
