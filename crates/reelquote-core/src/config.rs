//! Per-provider configuration records.
//!
//! Credentials come from the environment with a per-provider primary name
//! and a shared fallback, e.g. for cinemaworld:
//!
//! | Key | Purpose |
//! |-----|---------|
//! | `REELQUOTE_CINEMAWORLD_ACCESS_TOKEN` | provider-specific token |
//! | `REELQUOTE_ACCESS_TOKEN` | shared fallback token |
//! | `REELQUOTE_CINEMAWORLD_LOGO` | optional display-asset override |
//!
//! A provider whose token is absent fails construction on its own; the
//! remaining providers stay in the active set.

use std::env;

use crate::{ConfigError, ProviderId};

/// Settings needed to bind one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub access_token: String,
    pub logo_url: Option<String>,
}

impl ProviderSettings {
    pub fn new(
        provider: ProviderId,
        access_token: impl Into<String>,
        logo_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken { provider });
        }
        Ok(Self {
            access_token,
            logo_url,
        })
    }

    /// Read this provider's settings from the environment.
    ///
    /// # Errors
    /// - [`ConfigError::MissingAccessToken`] when neither the provider key
    ///   nor the shared fallback is set
    /// - [`ConfigError::EmptyAccessToken`] when the configured token is blank
    pub fn from_env(provider: ProviderId) -> Result<Self, ConfigError> {
        let prefix = provider.as_str().to_ascii_uppercase();
        let token = env::var(format!("REELQUOTE_{prefix}_ACCESS_TOKEN"))
            .or_else(|_| env::var("REELQUOTE_ACCESS_TOKEN"))
            .map_err(|_| ConfigError::MissingAccessToken { provider })?;
        let logo_url = env::var(format!("REELQUOTE_{prefix}_LOGO")).ok();

        Self::new(provider, token, logo_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_token() {
        let err = ProviderSettings::new(ProviderId::Cinemaworld, "  ", None)
            .expect_err("blank token must fail");
        assert!(matches!(err, ConfigError::EmptyAccessToken { .. }));
    }

    #[test]
    fn env_lookup_prefers_provider_key_then_fallback() {
        // Single test so the env mutations stay sequential.
        env::set_var("REELQUOTE_FILMWORLD_ACCESS_TOKEN", "fw-token");
        env::set_var("REELQUOTE_FILMWORLD_LOGO", "/static/fw.png");
        let settings =
            ProviderSettings::from_env(ProviderId::Filmworld).expect("provider key should win");
        assert_eq!(settings.access_token, "fw-token");
        assert_eq!(settings.logo_url.as_deref(), Some("/static/fw.png"));

        env::remove_var("REELQUOTE_FILMWORLD_ACCESS_TOKEN");
        env::remove_var("REELQUOTE_FILMWORLD_LOGO");
        env::set_var("REELQUOTE_ACCESS_TOKEN", "shared-token");
        let settings =
            ProviderSettings::from_env(ProviderId::Filmworld).expect("fallback should apply");
        assert_eq!(settings.access_token, "shared-token");
        assert_eq!(settings.logo_url, None);

        env::remove_var("REELQUOTE_ACCESS_TOKEN");
        let err = ProviderSettings::from_env(ProviderId::Filmworld)
            .expect_err("missing token must fail");
        assert!(matches!(err, ConfigError::MissingAccessToken { .. }));
    }
}
