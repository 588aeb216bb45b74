use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Provider-local movie identifier.
///
/// Ids are opaque: providers are not required to agree on a format, so no
/// trimming or case-folding is applied. The only invariant is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MovieId(String);

impl MovieId {
    pub fn new(input: impl Into<String>) -> Result<Self, ValidationError> {
        let value = input.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyMovieId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for MovieId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for MovieId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MovieId> for String {
    fn from(value: MovieId) -> Self {
        value.0
    }
}
