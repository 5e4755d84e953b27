//! Logging of a workout from plan selection until the workout is saved.
//!
//! The wizard is the only owner of the ongoing workout. Every change is written to the session
//! store immediately, so that an interrupted workout is resumed on the next mount.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use ironlog_domain::{
    CreateError, Exercise, ExerciseID, PlanID, Reps, Seconds, Weight, WorkoutExercise,
    WorkoutPlan, WorkoutRecord, WorkoutService, WorkoutSet, best_workout_for_exercise,
    last_workout_for_exercise,
};
use log::{debug, warn};

use crate::{
    ExerciseDraft, ExerciseStatus, KeyValueStore, OngoingWorkout, SelectedPlan, SessionStore,
    SetDraft,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Step {
    SelectingPlan,
    SelectingExercises,
    LoggingSets,
    Summary,
    Saved,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetField {
    Reps(Option<u32>),
    Weight(Option<f32>),
    Duration(Option<u32>),
    Notes(String),
}

#[derive(thiserror::Error, Debug)]
pub enum WizardError {
    #[error("{0}")]
    Validation(String),
    #[error("confirmation required")]
    ConfirmationRequired,
    #[error("not possible in step {0}")]
    InvalidStep(Step),
    #[error("no entry at position {0}")]
    InvalidIndex(usize),
    #[error("exercise already {0}")]
    Resolved(ExerciseStatus),
    #[error("at least one set is required")]
    MinimumOneSet,
    #[error("no exercise completed")]
    NothingCompleted,
    #[error(transparent)]
    Persistence(#[from] CreateError),
}

pub struct WorkoutWizard<S> {
    step: Step,
    ongoing_workout: OngoingWorkout,
    session_store: SessionStore<S>,
    exercises: BTreeMap<ExerciseID, Exercise>,
    history: Vec<WorkoutRecord>,
}

impl<S: KeyValueStore> WorkoutWizard<S> {
    /// Resumes the stored workout if there is one.
    pub fn mount(
        session_store: SessionStore<S>,
        exercises: Vec<Exercise>,
        history: Vec<WorkoutRecord>,
    ) -> Self {
        let (step, ongoing_workout) = match session_store.load() {
            Some(ongoing_workout) if !ongoing_workout.exercises.is_empty() => {
                debug!("resuming ongoing workout");
                (Step::LoggingSets, restored(ongoing_workout))
            }
            Some(_) => {
                warn!("discarding ongoing workout without exercises");
                session_store.clear();
                (Step::SelectingPlan, OngoingWorkout::default())
            }
            None => (Step::SelectingPlan, OngoingWorkout::default()),
        };
        Self {
            step,
            ongoing_workout,
            session_store,
            exercises: exercises.into_iter().map(|e| (e.id, e)).collect(),
            history,
        }
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn ongoing_workout(&self) -> &OngoingWorkout {
        &self.ongoing_workout
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.ongoing_workout.current_index
    }

    #[must_use]
    pub fn selected_exercise_ids(&self) -> Vec<ExerciseID> {
        self.ongoing_workout
            .exercises
            .iter()
            .map(|e| ExerciseID::from(e.exercise_id))
            .collect()
    }

    pub fn choose_plan(&mut self, plan: &WorkoutPlan) -> Result<(), WizardError> {
        self.expect_step(&[Step::SelectingPlan])?;

        let drafts = plan
            .ordered_exercises()
            .into_iter()
            .filter_map(|plan_exercise| {
                let Some(exercise) = self.exercises.get(&plan_exercise.exercise_id) else {
                    warn!(
                        "plan {} refers to unknown exercise {}",
                        *plan.id, *plan_exercise.exercise_id
                    );
                    return None;
                };
                Some(self.draft(exercise, plan_exercise.suggested_sets))
            })
            .collect::<Vec<_>>();

        if drafts.is_empty() {
            return Err(WizardError::Validation(String::from(
                "plan contains no exercises",
            )));
        }

        self.ongoing_workout = OngoingWorkout {
            plan: Some(SelectedPlan {
                id: *plan.id,
                name: plan.name.to_string(),
            }),
            exercises: drafts,
            ..OngoingWorkout::default()
        };
        self.step = Step::LoggingSets;
        self.persist();
        Ok(())
    }

    pub fn start_without_plan(&mut self) -> Result<(), WizardError> {
        self.expect_step(&[Step::SelectingPlan])?;
        self.step = Step::SelectingExercises;
        Ok(())
    }

    pub fn back_to_plans(&mut self) -> Result<(), WizardError> {
        self.expect_step(&[Step::SelectingExercises])?;
        self.step = Step::SelectingPlan;
        Ok(())
    }

    pub fn select_exercises(&mut self, ids: &[ExerciseID]) -> Result<(), WizardError> {
        self.expect_step(&[Step::SelectingExercises])?;

        if ids.is_empty() {
            return Err(WizardError::Validation(String::from(
                "no exercises selected",
            )));
        }

        let mut drafts: Vec<ExerciseDraft> = vec![];
        for id in ids {
            if drafts.iter().any(|d| d.exercise_id == **id) {
                continue;
            }
            let Some(exercise) = self.exercises.get(id) else {
                return Err(WizardError::Validation(format!("unknown exercise {}", **id)));
            };
            drafts.push(self.draft(exercise, 1));
        }

        self.ongoing_workout = OngoingWorkout {
            exercises: drafts,
            ..OngoingWorkout::default()
        };
        self.step = Step::LoggingSets;
        self.persist();
        Ok(())
    }

    /// The new set takes the values of the set at the same position in the most recent workout.
    pub fn add_set(&mut self, idx: usize) -> Result<(), WizardError> {
        self.expect_editable(idx)?;
        let draft = &self.ongoing_workout.exercises[idx];
        let exercise_id = ExerciseID::from(draft.exercise_id);
        let set = last_workout_for_exercise(&self.history, exercise_id)
            .and_then(|w| w.sets_of(exercise_id).nth(draft.sets.len()))
            .map(SetDraft::from)
            .unwrap_or_default();
        self.ongoing_workout.exercises[idx].sets.push(set);
        self.persist();
        Ok(())
    }

    pub fn remove_set(&mut self, idx: usize, set_idx: usize) -> Result<(), WizardError> {
        self.expect_editable(idx)?;
        let sets = &mut self.ongoing_workout.exercises[idx].sets;
        if set_idx >= sets.len() {
            return Err(WizardError::InvalidIndex(set_idx));
        }
        if sets.len() <= 1 {
            return Err(WizardError::MinimumOneSet);
        }
        sets.remove(set_idx);
        self.persist();
        Ok(())
    }

    /// Weight and duration stay zero for exercises that do not use them.
    pub fn edit_set(
        &mut self,
        idx: usize,
        set_idx: usize,
        field: SetField,
    ) -> Result<(), WizardError> {
        self.expect_editable(idx)?;
        let draft = &mut self.ongoing_workout.exercises[idx];
        let (uses_weight, uses_duration) = (draft.uses_weight, draft.uses_duration);
        let Some(set) = draft.sets.get_mut(set_idx) else {
            return Err(WizardError::InvalidIndex(set_idx));
        };

        match field {
            SetField::Reps(reps) => {
                if let Some(reps) = reps {
                    Reps::new(reps).map_err(invalid)?;
                }
                set.reps = reps;
            }
            SetField::Weight(weight) => {
                if let Some(weight) = weight.filter(|_| uses_weight) {
                    Weight::new(weight).map_err(invalid)?;
                }
                set.weight = weight;
            }
            SetField::Duration(duration) => {
                if let Some(duration) = duration.filter(|_| uses_duration) {
                    Seconds::new(duration).map_err(invalid)?;
                }
                set.duration = duration;
            }
            SetField::Notes(notes) => set.notes = notes,
        }

        if !uses_weight {
            set.weight = Some(0.0);
        }
        if !uses_duration {
            set.duration = Some(0);
        }

        self.persist();
        Ok(())
    }

    pub fn edit_exercise_notes(&mut self, idx: usize, notes: String) -> Result<(), WizardError> {
        self.expect_editable(idx)?;
        self.ongoing_workout.exercises[idx].notes = notes;
        self.persist();
        Ok(())
    }

    pub fn edit_workout_notes(&mut self, notes: String) -> Result<(), WizardError> {
        self.expect_step(&[Step::LoggingSets, Step::Summary])?;
        self.ongoing_workout.notes = notes;
        self.persist();
        Ok(())
    }

    pub fn complete_exercise(&mut self, idx: usize) -> Result<(), WizardError> {
        self.expect_exercise(idx)?;
        if self.ongoing_workout.exercises[idx]
            .sets
            .iter()
            .any(|s| s.reps.is_none_or(|r| r == 0))
        {
            return Err(WizardError::Validation(String::from(
                "every set requires at least one repetition",
            )));
        }
        self.resolve(idx, ExerciseStatus::Completed);
        Ok(())
    }

    pub fn skip_exercise(&mut self, idx: usize) -> Result<(), WizardError> {
        self.expect_exercise(idx)?;
        self.resolve(idx, ExerciseStatus::Skipped);
        Ok(())
    }

    pub fn resume_exercise(&mut self, idx: usize) -> Result<(), WizardError> {
        self.expect_exercise(idx)?;
        self.ongoing_workout.statuses.remove(&idx);
        self.ongoing_workout.current_index = idx;
        self.persist();
        Ok(())
    }

    pub fn go_to_exercise(&mut self, idx: usize) -> Result<(), WizardError> {
        self.expect_exercise(idx)?;
        self.ongoing_workout.current_index = idx;
        self.persist();
        Ok(())
    }

    /// Exercises that have been neither completed nor skipped are skipped after confirmation.
    pub fn finish(&mut self, confirmed: bool) -> Result<(), WizardError> {
        self.expect_step(&[Step::LoggingSets])?;
        if self.ongoing_workout.completed() == 0 {
            return Err(WizardError::NothingCompleted);
        }
        let unresolved = self.ongoing_workout.unresolved();
        if !unresolved.is_empty() && !confirmed {
            return Err(WizardError::ConfirmationRequired);
        }
        for idx in unresolved {
            self.ongoing_workout
                .statuses
                .insert(idx, ExerciseStatus::Skipped);
        }
        self.step = Step::Summary;
        self.persist();
        Ok(())
    }

    pub fn cancel(&mut self, confirmed: bool) -> Result<(), WizardError> {
        self.expect_step(&[Step::LoggingSets, Step::Summary])?;
        if !confirmed {
            return Err(WizardError::ConfirmationRequired);
        }
        self.session_store.clear();
        self.ongoing_workout = OngoingWorkout::default();
        self.step = Step::Cancelled;
        Ok(())
    }

    /// Exercises to be stored, without skipped exercises and placeholder sets.
    pub fn payload(&self) -> Result<Vec<WorkoutExercise>, WizardError> {
        self.ongoing_workout
            .exercises
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.ongoing_workout.status(*idx) != Some(ExerciseStatus::Skipped))
            .zip(0..)
            .map(|((_, draft), order_index)| {
                Ok(WorkoutExercise {
                    exercise_id: draft.exercise_id.into(),
                    order_index,
                    notes: non_empty(&draft.notes),
                    sets: draft
                        .sets
                        .iter()
                        .filter(|s| s.has_data())
                        .zip(1..)
                        .map(|(set, set_number)| workout_set(set, set_number))
                        .collect::<Result<Vec<_>, _>>()?,
                })
            })
            .collect()
    }

    /// The ongoing workout is kept if the workout could not be stored.
    pub async fn save(
        &mut self,
        service: &impl WorkoutService,
        workout_date: NaiveDateTime,
    ) -> Result<WorkoutRecord, WizardError> {
        self.expect_step(&[Step::Summary])?;
        let exercises = self.payload()?;
        let plan_id = self
            .ongoing_workout
            .plan
            .as_ref()
            .map(|p| PlanID::from(p.id));
        let record = service
            .create_workout(
                plan_id,
                workout_date,
                non_empty(&self.ongoing_workout.notes),
                exercises,
            )
            .await?;
        self.session_store.clear();
        self.step = Step::Saved;
        Ok(record)
    }

    fn draft(&self, exercise: &Exercise, suggested_sets: u32) -> ExerciseDraft {
        let mut sets = best_workout_for_exercise(&self.history, exercise.id)
            .map(|w| w.sets_of(exercise.id).map(SetDraft::from).collect::<Vec<_>>())
            .unwrap_or_default();
        if sets.is_empty() {
            sets = vec![SetDraft::default(); usize::try_from(suggested_sets.max(1)).unwrap_or(1)];
        }
        ExerciseDraft {
            exercise_id: *exercise.id,
            name: exercise.name.to_string(),
            uses_weight: exercise.uses_weight,
            uses_duration: exercise.uses_duration,
            notes: String::new(),
            sets,
        }
    }

    fn resolve(&mut self, idx: usize, status: ExerciseStatus) {
        self.ongoing_workout.statuses.insert(idx, status);
        if idx == self.ongoing_workout.current_index
            && idx + 1 < self.ongoing_workout.exercises.len()
        {
            self.ongoing_workout.current_index = idx + 1;
        }
        self.persist();
    }

    fn persist(&self) {
        self.session_store.save(&self.ongoing_workout);
    }

    fn expect_step(&self, steps: &[Step]) -> Result<(), WizardError> {
        if steps.contains(&self.step) {
            Ok(())
        } else {
            Err(WizardError::InvalidStep(self.step))
        }
    }

    fn expect_exercise(&self, idx: usize) -> Result<(), WizardError> {
        self.expect_step(&[Step::LoggingSets])?;
        if idx >= self.ongoing_workout.exercises.len() {
            return Err(WizardError::InvalidIndex(idx));
        }
        Ok(())
    }

    fn expect_editable(&self, idx: usize) -> Result<(), WizardError> {
        self.expect_exercise(idx)?;
        match self.ongoing_workout.status(idx) {
            Some(status) => Err(WizardError::Resolved(status)),
            None => Ok(()),
        }
    }
}

impl From<&WorkoutSet> for SetDraft {
    fn from(set: &WorkoutSet) -> Self {
        Self {
            reps: set.reps.map(u32::from),
            weight: set.weight.map(f32::from),
            duration: set.duration.map(u32::from),
            notes: String::new(),
        }
    }
}

/// Repairs a snapshot written by a different version or modified by hand.
fn restored(mut ongoing_workout: OngoingWorkout) -> OngoingWorkout {
    let len = ongoing_workout.exercises.len();
    ongoing_workout.statuses.retain(|idx, _| *idx < len);
    ongoing_workout.current_index = ongoing_workout.current_index.min(len.saturating_sub(1));
    for draft in &mut ongoing_workout.exercises {
        if draft.sets.is_empty() {
            draft.sets.push(SetDraft::default());
        }
    }
    ongoing_workout
}

fn workout_set(set: &SetDraft, set_number: u32) -> Result<WorkoutSet, WizardError> {
    Ok(WorkoutSet {
        set_number,
        reps: set.reps.map(Reps::new).transpose().map_err(invalid)?,
        weight: set.weight.map(Weight::new).transpose().map_err(invalid)?,
        duration: set.duration.map(Seconds::new).transpose().map_err(invalid)?,
        notes: non_empty(&set.notes),
    })
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[allow(clippy::needless_pass_by_value)]
fn invalid(err: impl std::error::Error) -> WizardError {
    WizardError::Validation(err.to_string())
}
