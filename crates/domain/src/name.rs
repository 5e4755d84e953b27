use derive_more::{AsRef, Display};

/// Display name of an exercise or a workout plan.
///
/// Surrounding whitespace is dropped. Uniqueness per user is checked by the service before
/// anything is stored.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub const MAX_LEN: usize = 64;

    pub fn new(name: &str) -> Result<Self, NameError> {
        let name = name.trim();
        match name.chars().count() {
            0 => Err(NameError::Empty),
            len if len > Self::MAX_LEN => Err(NameError::TooLong(len)),
            _ => Ok(Self(name.to_owned())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("Please enter a name")]
    Empty,
    #[error("Name is too long ({0} of at most {max} characters)", max = Name::MAX_LEN)]
    TooLong(usize),
}
