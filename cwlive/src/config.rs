//! Configuration loading.
//!
//! Values start from defaults and are overridden from the environment.
//! Lookups go through [`EnvSource`] so tests can supply their own map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Environment variable prefix for all CloudWatch Live settings.
pub const ENV_PREFIX: &str = "CWL_";

/// Error raised when an environment override cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for {key}: {message}")]
pub struct ConfigError {
    /// Full variable name.
    pub key: String,
    /// Parser message.
    pub message: String,
}

/// Abstraction over environment variable lookups.
pub trait EnvSource {
    /// Returns the value of `CWL_<key>`.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(format!("{ENV_PREFIX}{key}")).ok()
    }
}

/// Reads from an in-memory map keyed without the prefix.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Returns a trimmed, non-empty string override.
pub fn env_string<E: EnvSource + ?Sized>(env: &E, key: &str) -> Option<String> {
    env.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns a parsed `u64` override.
pub fn env_u64<E: EnvSource + ?Sized>(env: &E, key: &str) -> Result<Option<u64>, ConfigError> {
    env_string(env, key)
        .map(|v| {
            v.parse::<u64>().map_err(|e| ConfigError {
                key: format!("{ENV_PREFIX}{key}"),
                message: e.to_string(),
            })
        })
        .transpose()
}

/// Returns a comma-separated list override.
pub fn env_list<E: EnvSource + ?Sized>(env: &E, key: &str) -> Option<Vec<String>> {
    env_string(env, key).map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
}

/// Settings for the GraphQL API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// AppSync GraphQL endpoint URL.
    #[serde(default)]
    pub graphql_endpoint: String,
    /// User-pool token sent in the `Authorization` header.
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: String::new(),
            auth_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Creates a config for an endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            graphql_endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Loads defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&StdEnvSource)
    }

    /// Loads defaults overridden from the given source.
    pub fn from_source<E: EnvSource + ?Sized>(env: &E) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(endpoint) = env_string(env, "GRAPHQL_ENDPOINT") {
            config.graphql_endpoint = endpoint;
        }
        if let Some(token) = env_string(env, "AUTH_TOKEN") {
            config.auth_token = Some(token);
        }
        if let Some(secs) = env_u64(env, "API_TIMEOUT_SECS")? {
            config.timeout_secs = secs;
        }
        Ok(config)
    }

    /// Sets the auth token.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Gets the timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
