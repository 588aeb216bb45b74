use thiserror::Error;

use crate::ProviderId;

/// Validation and contract errors exposed by `reelquote-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("movie id cannot be empty")]
    EmptyMovieId,

    #[error("invalid provider '{value}', expected one of cinemaworld, filmworld")]
    InvalidProvider { value: String },

    #[error("invalid provider reference '{value}', expected 'provider=id'")]
    InvalidProviderRef { value: String },

    #[error("detail payload is missing mandatory field '{field}'")]
    MissingDetailField { field: &'static str },

    #[error("detail field '{field}' must be text")]
    DetailFieldNotText { field: &'static str },

    #[error("price '{value}' is not numeric")]
    PriceNotNumeric { value: String },

    #[error("price '{value}' must be finite")]
    NonFinitePrice { value: String },

    #[error("price '{value}' must be non-negative")]
    NegativePrice { value: String },
}

/// Per-provider construction failures.
///
/// Scope is always a single provider: the affected provider is excluded from
/// the active set and the process continues with the remaining providers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("access token for provider '{provider}' is not configured")]
    MissingAccessToken { provider: ProviderId },

    #[error("access token for provider '{provider}' is empty")]
    EmptyAccessToken { provider: ProviderId },
}
