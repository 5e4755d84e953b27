#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// Creating a record can fail like an update, with one difference: a duplicate name is not
/// discovered until the backend rejects it.
#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("an entry with this name already exists")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<UpdateError> for CreateError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Conflict => CreateError::Conflict,
            UpdateError::Storage(storage) => CreateError::Storage(storage),
            UpdateError::Other(other) => CreateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("another entry already uses this name")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// Failures of the hosted database that backs every repository.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("database unreachable")]
    NoConnection,
    /// The sign-in has expired. Only signing in again recovers.
    #[error("signed out")]
    NoSession,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// Rejected input for an exercise or a workout plan, before anything is written.
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    /// Carries the duplicate name.
    #[error("\"{0}\" already exists")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_create_error_from_update_error() {
        assert!(matches!(
            CreateError::from(UpdateError::Conflict),
            CreateError::Conflict
        ));
        assert!(matches!(
            CreateError::from(UpdateError::Storage(StorageError::NoSession)),
            CreateError::Storage(StorageError::NoSession)
        ));
        assert!(matches!(
            CreateError::from(UpdateError::Other("plan without exercises".into())),
            CreateError::Other(error) if error.to_string() == "plan without exercises"
        ));
    }

    #[rstest]
    #[case::offline(StorageError::NoConnection, "database unreachable")]
    #[case::signed_out(StorageError::NoSession, "signed out")]
    #[case::other(StorageError::Other("timeout".into()), "timeout")]
    fn test_read_error_shows_storage_cause(#[case] cause: StorageError, #[case] expected: &str) {
        let error = ReadError::from(cause);
        assert!(matches!(error, ReadError::Storage(_)));
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_read_error_from_other() {
        let error = ReadError::from(Box::<dyn std::error::Error>::from("invalid row"));
        assert!(matches!(error, ReadError::Other(_)));
        assert_eq!(error.to_string(), "invalid row");
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::Conflict("Bench Press".to_string()).to_string(),
            "\"Bench Press\" already exists"
        );
        assert_eq!(
            ValidationError::Other("Invalid color".into()).to_string(),
            "Invalid color"
        );
        assert_eq!(
            CreateError::Conflict.to_string(),
            "an entry with this name already exists"
        );
    }
}
