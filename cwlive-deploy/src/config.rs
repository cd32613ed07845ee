//! Deployment configuration.

use cwlive::config::{env_list, env_string, ConfigError, EnvSource, StdEnvSource};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the deployment tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// AWS region stacks live in.
    #[serde(default = "default_region")]
    pub region: String,
    /// Root of the local cache; logs go under `<cache_dir>/deploy/logs`.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Prefix of every CloudFormation stack name.
    #[serde(default = "default_stack_prefix")]
    pub stack_prefix: String,
    /// Stages offered by the interactive wizard.
    #[serde(default = "default_stages")]
    pub stages: Vec<String>,
}

fn default_region() -> String {
    "ap-southeast-2".to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".cache")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_stack_prefix() -> String {
    "cwl".to_string()
}

fn default_stages() -> Vec<String> {
    vec!["dev".to_string(), "prod".to_string()]
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            cache_dir: default_cache_dir(),
            log_level: default_log_level(),
            stack_prefix: default_stack_prefix(),
            stages: default_stages(),
        }
    }
}

impl DeployConfig {
    /// Loads defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&StdEnvSource)
    }

    /// Loads defaults overridden from the given source.
    pub fn from_source<E: EnvSource + ?Sized>(env: &E) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(region) = env_string(env, "DEPLOY_REGION") {
            config.region = region;
        }
        if let Some(dir) = env_string(env, "CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(level) = env_string(env, "LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(prefix) = env_string(env, "STACK_PREFIX") {
            config.stack_prefix = prefix;
        }
        if let Some(stages) = env_list(env, "STAGES") {
            if stages.is_empty() {
                return Err(ConfigError {
                    key: "CWL_STAGES".to_string(),
                    message: "at least one stage is required".to_string(),
                });
            }
            config.stages = stages;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwlive::config::MapEnvSource;

    #[test]
    fn test_defaults() {
        let config = DeployConfig::from_source(&MapEnvSource::new()).unwrap();
        assert_eq!(config.region, "ap-southeast-2");
        assert_eq!(config.cache_dir, PathBuf::from(".cache"));
        assert_eq!(config.stack_prefix, "cwl");
        assert_eq!(config.stages, vec!["dev", "prod"]);
    }

    #[test]
    fn test_env_overrides() {
        let env = MapEnvSource::new()
            .with("DEPLOY_REGION", "us-east-1")
            .with("CACHE_DIR", "/tmp/cwl")
            .with("LOG_LEVEL", "debug")
            .with("STACK_PREFIX", "cwlive")
            .with("STAGES", "dev,staging,prod");
        let config = DeployConfig::from_source(&env).unwrap();

        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/cwl"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.stack_prefix, "cwlive");
        assert_eq!(config.stages, vec!["dev", "staging", "prod"]);
    }

    #[test]
    fn test_empty_stage_list_is_rejected() {
        let env = MapEnvSource::new().with("STAGES", ",,");
        assert!(DeployConfig::from_source(&env).is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: DeployConfig = serde_json::from_str(r#"{"region": "eu-west-1"}"#).unwrap();
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.log_level, "info");
    }
}
