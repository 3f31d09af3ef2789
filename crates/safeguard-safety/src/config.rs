//! Connection settings for the hosted content-safety service

use crate::SafetyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the service endpoint
pub const ENDPOINT_ENV: &str = "CONTENT_SAFETY_ENDPOINT";

/// Environment variable holding the subscription key
pub const API_KEY_ENV: &str = "CONTENT_SAFETY_KEY";

/// Environment variable overriding the API version
pub const API_VERSION_ENV: &str = "CONTENT_SAFETY_API_VERSION";

/// Default text analysis API version
pub const DEFAULT_API_VERSION: &str = "2023-10-01";

/// Default timeout for a single request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request (no retry)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Upper bound on attempts per request
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Severity scale requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputType {
    /// Severities 0, 2, 4, 6
    #[default]
    FourSeverityLevels,
    /// Severities 0 through 7
    EightSeverityLevels,
}

/// Configuration for [`ContentSafetyClient`](crate::ContentSafetyClient)
///
/// Built once by the caller and handed to the client at construction.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSafetyConfig {
    /// Resource endpoint (e.g., "https://my-resource.cognitiveservices.azure.com")
    pub endpoint: String,

    /// Subscription key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// Text analysis API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Severity scale requested from the service
    #[serde(default)]
    pub output_type: OutputType,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl ContentSafetyConfig {
    /// Create a configuration with default settings for the given resource
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: default_api_version(),
            output_type: OutputType::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Load the configuration from `CONTENT_SAFETY_*` environment variables
    pub fn from_env() -> Result<Self, SafetyError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SafetyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENDPOINT_ENV)
            .ok_or_else(|| SafetyError::Config(format!("{} is not set", ENDPOINT_ENV)))?;
        let api_key = lookup(API_KEY_ENV)
            .ok_or_else(|| SafetyError::Config(format!("{} is not set", API_KEY_ENV)))?;

        let mut config = Self::new(endpoint, api_key);
        if let Some(version) = lookup(API_VERSION_ENV) {
            config.api_version = version;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SafetyError> {
        if self.endpoint.trim().is_empty() {
            return Err(SafetyError::Config("endpoint must not be empty".to_string()));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(SafetyError::Config(format!(
                "endpoint '{}' must start with http:// or https://",
                self.endpoint
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(SafetyError::Config("api_key must not be empty".to_string()));
        }
        if self.api_version.trim().is_empty() {
            return Err(SafetyError::Config("api_version must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(SafetyError::Config("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(SafetyError::Config("max_attempts must be greater than 0".to_string()));
        }
        if self.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(SafetyError::Config(format!(
                "max_attempts must be at most {}",
                MAX_ATTEMPTS_LIMIT
            )));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, SafetyError> {
        toml::from_str(toml_str)
            .map_err(|e| SafetyError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, SafetyError> {
        toml::to_string_pretty(self)
            .map_err(|e| SafetyError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl fmt::Debug for ContentSafetyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSafetyConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("output_type", &self.output_type)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid_config() -> ContentSafetyConfig {
        ContentSafetyConfig::new("https://example.cognitiveservices.azure.com", "secret-key")
    }

    #[test]
    fn test_new_config_is_valid() {
        let config = valid_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.output_type, OutputType::FourSeverityLevels);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = valid_config();
        config.endpoint = "example.com".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_key_and_limits() {
        let mut config = valid_config();
        config.api_key = String::new();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.max_attempts = MAX_ATTEMPTS_LIMIT;
        assert!(config.validate().is_ok());
        config.max_attempts = MAX_ATTEMPTS_LIMIT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENDPOINT_ENV, "https://example.com"),
            (API_KEY_ENV, "k"),
            (API_VERSION_ENV, "2024-09-01"),
        ]
        .into_iter()
        .collect();

        let config =
            ContentSafetyConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.endpoint, "https://example.com");
        assert_eq!(config.api_version, "2024-09-01");
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let result = ContentSafetyConfig::from_lookup(|name| {
            (name == ENDPOINT_ENV).then(|| "https://example.com".to_string())
        });
        match result {
            Err(SafetyError::Config(msg)) => assert!(msg.contains(API_KEY_ENV)),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_defaults() {
        let config = ContentSafetyConfig::from_toml(
            r#"
            endpoint = "https://example.com"
            api_key = "k"
            output_type = "EightSeverityLevels"
            "#,
        )
        .unwrap();

        assert_eq!(config.output_type, OutputType::EightSeverityLevels);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = valid_config();
        let parsed = ContentSafetyConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
