use chrono::NaiveDateTime;
use log::{debug, error};

use crate::{
    Color, CreateError, DeleteError, Exercise, ExerciseID, ExerciseRepository, ExerciseService,
    Name, PlanExercise, PlanID, PlanRepository, PlanService, ReadError, UpdateError,
    WorkoutExercise, WorkoutID, WorkoutPlan, WorkoutRecord, WorkoutRepository, WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn create_exercise(&self, exercise: Exercise) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(exercise),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository.replace_exercise(exercise),
            UpdateError,
            "replace",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

impl<R: PlanRepository> PlanService for Service<R> {
    async fn get_plans(&self) -> Result<Vec<WorkoutPlan>, ReadError> {
        log_on_error!(self.repository.read_plans(), ReadError, "get", "plans")
    }

    async fn create_plan(
        &self,
        name: Name,
        color: Color,
        description: Option<String>,
        exercises: Vec<PlanExercise>,
    ) -> Result<WorkoutPlan, CreateError> {
        log_on_error!(
            self.repository
                .create_plan(name, color, description, exercises),
            CreateError,
            "create",
            "plan"
        )
    }

    async fn modify_plan(
        &self,
        id: PlanID,
        name: Option<Name>,
        color: Option<Color>,
        description: Option<Option<String>>,
        exercises: Option<Vec<PlanExercise>>,
    ) -> Result<WorkoutPlan, UpdateError> {
        log_on_error!(
            self.repository
                .modify_plan(id, name, color, description, exercises),
            UpdateError,
            "modify",
            "plan"
        )
    }

    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError> {
        log_on_error!(
            self.repository.delete_plan(id),
            DeleteError,
            "delete",
            "plan"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn create_workout(
        &self,
        plan_id: Option<PlanID>,
        workout_date: NaiveDateTime,
        notes: Option<String>,
        exercises: Vec<WorkoutExercise>,
    ) -> Result<WorkoutRecord, CreateError> {
        log_on_error!(
            self.repository
                .create_workout(plan_id, workout_date, notes, exercises),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn modify_workout(
        &self,
        id: WorkoutID,
        notes: Option<Option<String>>,
        exercises: Option<Vec<WorkoutExercise>>,
    ) -> Result<WorkoutRecord, UpdateError> {
        log_on_error!(
            self.repository.modify_workout(id, notes, exercises),
            UpdateError,
            "modify",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}
