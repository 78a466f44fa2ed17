//! Process configuration.
//!
//! Layered the same way for every host mode:
//! 1) built-in defaults -> 2) YAML file (if provided) -> 3) environment.
//!
//! Values are read leniently: an empty value counts as absent, and an upstream
//! timeout that is not a positive whole number of seconds falls back to the
//! default instead of failing startup.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Environment variables consulted by [`AppConfig::load`].
pub const ENV_KEYS: [&str; 4] = ["ENVIRONMENT", "LOG_LEVEL", "API_ENDPOINT", "API_TIMEOUT"];

pub const DEFAULT_ENVIRONMENT: &str = "local";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_API_ENDPOINT: &str = "https://api.example.com";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Effective configuration, read-only after startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Deployment environment name (`local`, `dev`, `prod`, ...)
    pub environment: String,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Upstream job source endpoint
    pub api_endpoint: String,
    /// Upstream timeout in whole seconds
    pub api_timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_owned(),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_owned(),
            api_timeout: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

/// Untyped view of the config sources; every key is optional and loosely typed.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    environment: Option<Value>,
    #[serde(default)]
    log_level: Option<Value>,
    #[serde(default)]
    api_endpoint: Option<Value>,
    #[serde(default)]
    api_timeout: Option<Value>,
}

impl AppConfig {
    /// Load configuration from an optional YAML file and the process environment.
    ///
    /// Loading has no side effects, so calling it twice against the same
    /// environment yields equal values.
    ///
    /// # Errors
    /// Returns an error if `path` is given but is not a file, or if the file
    /// cannot be parsed as YAML.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();

        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::raw().only(&ENV_KEYS));
        Self::from_figment(&figment)
    }

    /// Resolve configuration from an already assembled figment.
    ///
    /// # Errors
    /// Returns an error if a provider in the figment fails to produce data.
    pub fn from_figment(figment: &Figment) -> anyhow::Result<Self> {
        let raw: RawConfig = figment
            .extract()
            .context("failed to read configuration sources")?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        Self {
            environment: string_or(raw.environment, DEFAULT_ENVIRONMENT),
            log_level: string_or(raw.log_level, DEFAULT_LOG_LEVEL),
            api_endpoint: string_or(raw.api_endpoint, DEFAULT_API_ENDPOINT),
            api_timeout: timeout_secs_or_default(raw.api_timeout),
        }
    }

    /// Upstream timeout as a `Duration`.
    #[must_use]
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout)
    }
}

fn string_or(value: Option<Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_owned(),
    }
}

fn timeout_secs_or_default(value: Option<Value>) -> u64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match parsed {
        Some(secs) if secs > 0 => secs,
        _ => DEFAULT_API_TIMEOUT_SECS,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;

    fn load_in(jail: &Jail, file: Option<&str>) -> AppConfig {
        let path = file.map(|f| jail.directory().join(f));
        AppConfig::load(path.as_deref()).unwrap()
    }

    #[test]
    fn all_variables_set() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("ENVIRONMENT", "production");
            jail.set_env("LOG_LEVEL", "debug");
            jail.set_env("API_ENDPOINT", "https://api.production.com");
            jail.set_env("API_TIMEOUT", "60");

            let cfg = load_in(jail, None);
            assert_eq!(
                cfg,
                AppConfig {
                    environment: "production".to_owned(),
                    log_level: "debug".to_owned(),
                    api_endpoint: "https://api.production.com".to_owned(),
                    api_timeout: 60,
                }
            );
            Ok(())
        });
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            assert_eq!(load_in(jail, None), AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn partial_environment_keeps_remaining_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("ENVIRONMENT", "staging");
            jail.set_env("API_TIMEOUT", "45");

            let cfg = load_in(jail, None);
            assert_eq!(cfg.environment, "staging");
            assert_eq!(cfg.log_level, DEFAULT_LOG_LEVEL);
            assert_eq!(cfg.api_endpoint, DEFAULT_API_ENDPOINT);
            assert_eq!(cfg.api_timeout, 45);
            Ok(())
        });
    }

    #[test]
    fn malformed_timeout_falls_back_to_default() {
        for bad in ["invalid", "-5", "0", "1.5", ""] {
            Jail::expect_with(|jail| {
                jail.clear_env();
                jail.set_env("API_TIMEOUT", bad);
                assert_eq!(
                    load_in(jail, None).api_timeout,
                    DEFAULT_API_TIMEOUT_SECS,
                    "API_TIMEOUT={bad:?}"
                );
                Ok(())
            });
        }
    }

    #[test]
    fn empty_strings_count_as_absent() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("ENVIRONMENT", "");
            jail.set_env("API_ENDPOINT", "  ");

            let cfg = load_in(jail, None);
            assert_eq!(cfg.environment, DEFAULT_ENVIRONMENT);
            assert_eq!(cfg.api_endpoint, DEFAULT_API_ENDPOINT);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_yaml_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "careers.yaml",
                "environment: dev\nlog_level: debug\napi_endpoint: https://api.dev.com\napi_timeout: 15\n",
            )?;
            jail.set_env("LOG_LEVEL", "error");

            let cfg = load_in(jail, Some("careers.yaml"));
            assert_eq!(cfg.environment, "dev");
            assert_eq!(cfg.log_level, "error");
            assert_eq!(cfg.api_endpoint, "https://api.dev.com");
            assert_eq!(cfg.api_timeout, 15);
            Ok(())
        });
    }

    #[test]
    fn missing_config_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let path = jail.directory().join("absent.yaml");
            assert!(AppConfig::load(Some(&path)).is_err());
            Ok(())
        });
    }

    #[test]
    fn loading_twice_yields_equal_values() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("API_TIMEOUT", "12");
            assert_eq!(load_in(jail, None), load_in(jail, None));
            Ok(())
        });
    }

    #[test]
    fn api_timeout_converts_to_duration() {
        let cfg = AppConfig {
            api_timeout: 7,
            ..AppConfig::default()
        };
        assert_eq!(cfg.api_timeout(), Duration::from_secs(7));
    }
}
