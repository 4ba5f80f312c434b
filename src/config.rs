//! Process configuration.
//!
//! All environment-derived settings are resolved once at startup into
//! an explicit [`AppConfig`] that callers pass to whatever needs it;
//! library code never reads the environment at point of use.

use thiserror::Error;

/// Default minutes between background reminder sweeps.
const DEFAULT_SWEEP_MINUTES: u32 = 15;

/// Errors raised while resolving process configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("missing required environment variable {0}")]
    MissingVariable(&'static str),

    /// A variable is present but unusable.
    #[error("invalid value '{value}' for environment variable {name}")]
    InvalidVariable {
        /// Variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Connection string for the external document store.
    pub store_url: String,
    /// Credential for the messaging transport.
    pub transport_token: String,
    /// Minutes between background reminder sweeps.
    pub sweep_minutes: u32,
}

impl AppConfig {
    /// Variable naming the document-store connection string.
    pub const STORE_URL_VAR: &'static str = "QUESTLINE_STORE_URL";
    /// Variable naming the transport credential.
    pub const TRANSPORT_TOKEN_VAR: &'static str = "QUESTLINE_TRANSPORT_TOKEN";
    /// Variable naming the sweep cadence.
    pub const SWEEP_MINUTES_VAR: &'static str = "QUESTLINE_SWEEP_MINUTES";

    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is absent or a
    /// numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup,
    /// letting tests inject environments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is absent or a
    /// numeric variable cannot be parsed.
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let store_url = lookup(Self::STORE_URL_VAR)
            .ok_or(ConfigError::MissingVariable(Self::STORE_URL_VAR))?;
        let transport_token = lookup(Self::TRANSPORT_TOKEN_VAR)
            .ok_or(ConfigError::MissingVariable(Self::TRANSPORT_TOKEN_VAR))?;
        let sweep_minutes = match lookup(Self::SWEEP_MINUTES_VAR) {
            None => DEFAULT_SWEEP_MINUTES,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidVariable {
                    name: Self::SWEEP_MINUTES_VAR,
                    value: raw,
                })?,
        };
        Ok(Self {
            store_url,
            transport_token,
            sweep_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DEFAULT_SWEEP_MINUTES};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> = pairs
            .iter()
            .map(|(name, value)| (*name, (*value).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn resolves_with_default_sweep_cadence() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (AppConfig::STORE_URL_VAR, "mongodb://localhost/questline"),
            (AppConfig::TRANSPORT_TOKEN_VAR, "token-123"),
        ]))
        .expect("config should resolve");

        assert_eq!(config.store_url, "mongodb://localhost/questline");
        assert_eq!(config.sweep_minutes, DEFAULT_SWEEP_MINUTES);
    }

    #[test]
    fn missing_store_url_is_reported() {
        let result = AppConfig::from_lookup(lookup_from(&[(
            AppConfig::TRANSPORT_TOKEN_VAR,
            "token-123",
        )]));

        assert_eq!(
            result,
            Err(ConfigError::MissingVariable(AppConfig::STORE_URL_VAR))
        );
    }

    #[test]
    fn malformed_sweep_cadence_is_reported() {
        let result = AppConfig::from_lookup(lookup_from(&[
            (AppConfig::STORE_URL_VAR, "mongodb://localhost/questline"),
            (AppConfig::TRANSPORT_TOKEN_VAR, "token-123"),
            (AppConfig::SWEEP_MINUTES_VAR, "soon"),
        ]));

        assert_eq!(
            result,
            Err(ConfigError::InvalidVariable {
                name: AppConfig::SWEEP_MINUTES_VAR,
                value: "soon".to_owned(),
            })
        );
    }
}
