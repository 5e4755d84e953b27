use std::collections::BTreeMap;

use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError, ValidationError};

pub const UNKNOWN_EXERCISE: &str = "Unknown exercise";

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(&self, exercise: Exercise) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;

    async fn validate_exercise_name(
        &self,
        name: &str,
        id: ExerciseID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_exercises().await {
                Ok(exercises) => {
                    if exercises.iter().all(|e| e.id == id || e.name != name) {
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
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(&self, exercise: Exercise) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub description: Option<String>,
    pub uses_weight: bool,
    pub uses_duration: bool,
}

impl Exercise {
    /// Copy of the exercise under a new name, not yet persisted.
    #[must_use]
    pub fn duplicate(&self) -> Exercise {
        let name = Name::new(&format!("{} (copy)", self.name)).unwrap_or(self.name.clone());
        Exercise {
            id: ExerciseID::nil(),
            name,
            description: self.description.clone(),
            uses_weight: self.uses_weight,
            uses_duration: self.uses_duration,
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Display name of an exercise, or a fallback if the exercise was deleted.
#[must_use]
pub fn exercise_label(exercises: &BTreeMap<ExerciseID, Exercise>, id: ExerciseID) -> String {
    exercises
        .get(&id)
        .map_or_else(|| UNKNOWN_EXERCISE.to_string(), |e| e.name.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::tests::data::exercise;

    use super::*;

    struct Exercises(Vec<Exercise>);

    impl ExerciseService for Exercises {
        async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
            Ok(self.0.clone())
        }

        async fn create_exercise(&self, exercise: Exercise) -> Result<Exercise, CreateError> {
            Ok(exercise)
        }

        async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
            Ok(exercise)
        }

        async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
            Ok(id)
        }
    }

    #[test]
    fn test_exercise_duplicate() {
        let mut original = exercise(1, "Plank", false, true);
        original.description = Some(String::from("Core"));
        assert_eq!(
            original.duplicate(),
            Exercise {
                id: ExerciseID::nil(),
                name: Name::new("Plank (copy)").unwrap(),
                description: Some(String::from("Core")),
                uses_weight: false,
                uses_duration: true,
            }
        );
    }

    #[test]
    fn test_exercise_duplicate_long_name() {
        let name = "A".repeat(Name::MAX_LEN);
        let original = exercise(1, &name, true, false);
        assert_eq!(original.duplicate().name, original.name);
    }

    #[test]
    fn test_exercise_label() {
        let exercises = BTreeMap::from([(1.into(), exercise(1, "Squat", true, false))]);
        assert_eq!(exercise_label(&exercises, 1.into()), "Squat");
        assert_eq!(exercise_label(&exercises, 2.into()), UNKNOWN_EXERCISE);
    }

    #[test]
    fn test_exercise_id_nil() {
        assert!(ExerciseID::nil().is_nil());
        assert_eq!(ExerciseID::nil(), ExerciseID::default());
    }

    #[tokio::test]
    async fn test_validate_exercise_name() {
        let service = Exercises(vec![
            exercise(1, "Squat", true, false),
            exercise(2, "Plank", false, true),
        ]);
        assert_eq!(
            service
                .validate_exercise_name(" Deadlift ", ExerciseID::nil())
                .await
                .unwrap(),
            Name::new("Deadlift").unwrap()
        );
        assert_eq!(
            service
                .validate_exercise_name("Squat", 1.into())
                .await
                .unwrap(),
            Name::new("Squat").unwrap()
        );
        assert!(matches!(
            service.validate_exercise_name("Squat", 2.into()).await,
            Err(ValidationError::Conflict(field)) if field == "name"
        ));
        assert!(matches!(
            service.validate_exercise_name("", 2.into()).await,
            Err(ValidationError::Other(_))
        ));
    }
}
