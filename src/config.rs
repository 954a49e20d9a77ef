/// Service configuration loader - parses viva.toml
///
/// Keeps the upstream URL, station patterns and exporter settings out of
/// the code. Every key is optional; a missing file means defaults. The
/// `VIVA_BASE_URL` and `VIVA_LISTEN` environment variables (also read
/// from `.env`) override the file.

use crate::ingest::viva::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::model::VivaError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "viva.toml";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:9798";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

pub const ENV_BASE_URL: &str = "VIVA_BASE_URL";
pub const ENV_LISTEN: &str = "VIVA_LISTEN";

/// Settings loaded from viva.toml
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Station name fragments; used when none are given on the command line
    pub patterns: Vec<String>,
    /// Address of the /metrics endpoint
    pub listen: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            patterns: Vec::new(),
            listen: DEFAULT_LISTEN.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Applies environment overrides through `lookup`, so tests need not
    /// touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(listen) = lookup(ENV_LISTEN).filter(|v| !v.is_empty()) {
            self.listen = listen;
        }
    }

    /// Rejects values the service cannot run with.
    pub fn validate(self) -> Result<Self, VivaError> {
        if self.base_url.is_empty() {
            return Err(VivaError::Config("base_url must not be empty".to_string()));
        }
        if self.poll_interval_secs == 0 {
            return Err(VivaError::Config("poll_interval_secs must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(VivaError::Config("request_timeout_secs must be at least 1".to_string()));
        }
        Ok(self)
    }
}

/// Parses configuration from TOML text. Values are checked by
/// `ServiceConfig::validate` once overrides have been applied.
pub fn parse_config(contents: &str) -> Result<ServiceConfig, VivaError> {
    toml::from_str(contents)
        .map_err(|e| VivaError::Config(format!("TOML parse failed: {}", e)))
}

/// Loads configuration from `path`, falling back to defaults when the file
/// does not exist, then applies environment overrides.
///
/// # Errors
/// `VivaError::Config` if the file exists but cannot be read or parsed, or
/// holds invalid values.
pub fn load_config(path: &Path) -> Result<ServiceConfig, VivaError> {
    dotenv::dotenv().ok();

    let mut config = if path.exists() {
        let contents = fs::read_to_string(path).map_err(|e| {
            VivaError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        parse_config(&contents)?
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        ServiceConfig::default()
    };

    config.apply_env(|key| std::env::var(key).ok());
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = parse_config("").expect("empty config is valid");
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_full_file_parses() {
        let config = parse_config(
            r#"
            base_url = "http://localhost:8080/viva/"
            patterns = ["göteborg", "Malmö"]
            listen = "127.0.0.1:9100"
            poll_interval_secs = 60
            request_timeout_secs = 5
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.base_url, "http://localhost:8080/viva/");
        assert_eq!(config.patterns, vec!["göteborg", "Malmö"]);
        assert_eq!(config.listen, "127.0.0.1:9100");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = parse_config("poll_interval = 5");
        assert!(matches!(result, Err(VivaError::Config(_))));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config = parse_config("poll_interval_secs = 0").expect("syntax is valid");
        assert!(matches!(config.validate(), Err(VivaError::Config(_))));
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://mirror.example/viva/"),
            (ENV_LISTEN, ""),
        ]
        .into_iter()
        .collect();

        let mut config = parse_config(r#"listen = "127.0.0.1:1""#).expect("config should parse");
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://mirror.example/viva/");
        assert_eq!(config.listen, "127.0.0.1:1", "empty override is ignored");
    }

    #[test]
    fn test_env_override_is_applied_before_validation() {
        // An empty base_url in the file is fine when the environment supplies one.
        let mut config = parse_config(r#"base_url = """#).expect("syntax is valid");
        config.apply_env(|k| (k == ENV_BASE_URL).then(|| "http://mirror.example/".to_string()));
        let config = config.validate().expect("override makes the config valid");
        assert_eq!(config.base_url, "http://mirror.example/");

        let mut config = parse_config(r#"base_url = """#).expect("syntax is valid");
        config.apply_env(|_| None);
        assert!(matches!(config.validate(), Err(VivaError::Config(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("does/not/exist/viva.toml"))
            .expect("missing file is not an error");
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    }
}
