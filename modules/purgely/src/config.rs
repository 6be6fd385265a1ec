//! Configuration for the purgely module
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! `PURGELY_*` environment variables. A value supplied by an outer layer is
//! never replaced by a default.

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Prefix for environment overrides (`PURGELY_FASTLY_KEY`, ...)
pub const ENV_PREFIX: &str = "PURGELY_";

/// Settings read verbatim from the environment.
///
/// `Env` parses values, so an all-digit API key or service ID would arrive as
/// a number (and lose leading zeros). These keys are re-merged as raw strings.
const RAW_STRING_KEYS: [&str; 3] = ["api_endpoint", "fastly_key", "fastly_service_id"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist
    #[error("configuration file not found: {0}")]
    MissingFile(PathBuf),
    /// A layer holds a value of the wrong type
    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Purgely configuration
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Fastly API endpoint, with trailing slash
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// Fastly API key
    #[serde(default)]
    pub fastly_key: String,

    /// Fastly service ID
    #[serde(default)]
    pub fastly_service_id: String,

    /// Allow full-service purges
    #[serde(default)]
    pub allow_purge_all: bool,

    /// Emit stale-while-revalidate by default
    #[serde(default = "default_true")]
    pub enable_stale_while_revalidate: bool,

    /// Default stale-while-revalidate TTL (seconds)
    #[serde(default = "default_stale_ttl")]
    pub stale_while_revalidate_ttl: u64,

    /// Emit stale-while-error by default
    #[serde(default = "default_true")]
    pub enable_stale_while_error: bool,

    /// Default stale-while-error TTL (seconds)
    #[serde(default = "default_stale_ttl")]
    pub stale_while_error_ttl: u64,

    /// Default surrogate-control max-age (seconds)
    #[serde(default = "default_surrogate_control_ttl")]
    pub surrogate_control_ttl: u64,

    /// Timeout for calls to the Fastly API
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Hosts allowed to receive the API key on URL purges
    #[serde(default)]
    pub purge_hosts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            fastly_key: String::new(),
            fastly_service_id: String::new(),
            allow_purge_all: false,
            enable_stale_while_revalidate: true,
            stale_while_revalidate_ttl: default_stale_ttl(),
            enable_stale_while_error: true,
            stale_while_error_ttl: default_stale_ttl(),
            surrogate_control_ttl: default_surrogate_control_ttl(),
            request_timeout: default_request_timeout(),
            purge_hosts: Vec::new(),
        }
    }
}

impl Config {
    /// Layered figment: defaults < YAML file < environment
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        for key in RAW_STRING_KEYS {
            let var = format!("{}{}", ENV_PREFIX, key.to_ascii_uppercase());
            if let Ok(value) = std::env::var(&var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        figment
    }

    /// Resolve the configuration once at startup
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }

        let config: Config = Self::figment(path).extract().map_err(Box::new)?;
        tracing::debug!(?config, "purgely configuration resolved");
        Ok(config)
    }

    /// Whether API key and service ID are both present
    pub fn is_configured(&self) -> bool {
        !self.fastly_key.is_empty() && !self.fastly_service_id.is_empty()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.fastly_key.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("Config")
            .field("api_endpoint", &self.api_endpoint)
            .field("fastly_key", &key)
            .field("fastly_service_id", &self.fastly_service_id)
            .field("allow_purge_all", &self.allow_purge_all)
            .field("enable_stale_while_revalidate", &self.enable_stale_while_revalidate)
            .field("stale_while_revalidate_ttl", &self.stale_while_revalidate_ttl)
            .field("enable_stale_while_error", &self.enable_stale_while_error)
            .field("stale_while_error_ttl", &self.stale_while_error_ttl)
            .field("surrogate_control_ttl", &self.surrogate_control_ttl)
            .field("request_timeout", &self.request_timeout)
            .field("purge_hosts", &self.purge_hosts)
            .finish()
    }
}

fn default_api_endpoint() -> String {
    "https://api.fastly.com/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_stale_ttl() -> u64 {
    60 * 60 * 24 // 24 hours
}

fn default_surrogate_control_ttl() -> u64 {
    60 * 5 // 5 minutes
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_endpoint, "https://api.fastly.com/");
        assert!(config.fastly_key.is_empty());
        assert!(config.fastly_service_id.is_empty());
        assert!(!config.allow_purge_all);
        assert!(config.enable_stale_while_revalidate);
        assert_eq!(config.stale_while_revalidate_ttl, 86_400);
        assert!(config.enable_stale_while_error);
        assert_eq!(config.stale_while_error_ttl, 86_400);
        assert_eq!(config.surrogate_control_ttl, 300);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_empty_layers_resolve_to_defaults() {
        Jail::expect_with(|_jail| {
            let config: Config = Config::figment(None).extract()?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_env_value_is_not_overwritten_by_default() {
        Jail::expect_with(|jail| {
            jail.set_env("PURGELY_SURROGATE_CONTROL_TTL", "600");
            jail.set_env("PURGELY_ALLOW_PURGE_ALL", "true");
            let config: Config = Config::figment(None).extract()?;
            assert_eq!(config.surrogate_control_ttl, 600);
            assert!(config.allow_purge_all);
            assert_eq!(config.stale_while_error_ttl, 86_400);
            Ok(())
        });
    }

    #[test]
    fn test_numeric_looking_strings_stay_verbatim() {
        Jail::expect_with(|jail| {
            jail.set_env("PURGELY_FASTLY_KEY", "0042");
            jail.set_env("PURGELY_FASTLY_SERVICE_ID", "1234567890");
            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.fastly_key, "0042");
            assert_eq!(config.fastly_service_id, "1234567890");
            assert!(config.is_configured());
            Ok(())
        });
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config {
            fastly_key: "secret-token".to_string(),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/purgely.yaml")));
        assert!(matches!(result, Err(ConfigError::MissingFile(_))));
    }
}
