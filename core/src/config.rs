//! Account credentials and where they come from.
//!
//! # Design
//! Nothing in the core logic hard-codes credentials. Callers either build
//! an `SdConfig` directly or load one from the environment with
//! `from_env`, whose variable names mirror the account settings the
//! service has always documented.

use std::env;

use crate::error::ConfigError;

/// Account credentials for the API.
///
/// `subdomain` is the account's subdomain only (e.g. `example` for
/// `example.serverdensity.com`); the client appends the service domain when
/// building the `account` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdConfig {
    pub subdomain: String,
    pub api_key: String,
    pub username: String,
    pub password: String,
}

impl SdConfig {
    pub fn new(subdomain: &str, api_key: &str, username: &str, password: &str) -> Self {
        Self {
            subdomain: subdomain.to_string(),
            api_key: api_key.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Load credentials from `SD_ACCOUNT_SUBDOMAIN`, `SD_ACCOUNT_API_KEY`,
    /// `SD_ACCOUNT_USERNAME` and `SD_ACCOUNT_PASSWORD`. An unset or empty
    /// variable is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            subdomain: require("SD_ACCOUNT_SUBDOMAIN")?,
            api_key: require("SD_ACCOUNT_API_KEY")?,
            username: require("SD_ACCOUNT_USERNAME")?,
            password: require("SD_ACCOUNT_PASSWORD")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
