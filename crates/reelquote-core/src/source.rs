use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical provider identifiers for the fixed backend set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Cinemaworld,
    Filmworld,
}

impl ProviderId {
    pub const ALL: [Self; 2] = [Self::Cinemaworld, Self::Filmworld];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cinemaworld => "cinemaworld",
            Self::Filmworld => "filmworld",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cinemaworld" => Ok(Self::Cinemaworld),
            "filmworld" => Ok(Self::Filmworld),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_providers_case_insensitively() {
        let parsed: ProviderId = " CinemaWorld ".parse().expect("provider should parse");
        assert_eq!(parsed, ProviderId::Cinemaworld);
        assert_eq!(parsed.as_str(), "cinemaworld");
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = "videoworld".parse::<ProviderId>().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidProvider { .. }));
    }
}
