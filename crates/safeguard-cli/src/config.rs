//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use safeguard_safety::ContentSafetyConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Service profiles by name
    #[serde(default)]
    pub profiles: BTreeMap<String, ContentSafetyConfig>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// REPL history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// Get the directory holding the config file and REPL history.
    pub fn home_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".safeguard"))
    }

    /// Load configuration from `path`, or the default configuration if the
    /// file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&ContentSafetyConfig> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: ContentSafetyConfig) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Service settings for this run.
    ///
    /// Starts from `profile` (the `--profile` flag) or the active profile and
    /// applies the `--endpoint` / `--api-key` overrides. The stored active
    /// profile is left untouched. Without a stored profile both overrides are
    /// required.
    pub fn resolve_service(
        &self,
        profile: Option<&str>,
        endpoint: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<ContentSafetyConfig> {
        if let Some(name) = profile {
            if !self.profiles.contains_key(name) {
                return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
            }
        }
        let name = profile.unwrap_or(self.active_profile.as_str());

        let mut service = match (self.profiles.get(name), endpoint, api_key) {
            (Some(stored), _, _) => stored.clone(),
            (None, Some(endpoint), Some(api_key)) => ContentSafetyConfig::new(endpoint, api_key),
            (None, _, _) => {
                return Err(CliError::Config(format!(
                    "Profile '{}' not found. Create it with 'safeguard profile set' \
                     or pass --endpoint and --api-key",
                    name
                )))
            }
        };

        if let Some(endpoint) = endpoint {
            service.endpoint = endpoint.to_string();
        }
        if let Some(api_key) = api_key {
            service.api_key = api_key.to_string();
        }

        service.validate()?;
        Ok(service)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_profile: default_profile(),
            profiles: BTreeMap::new(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}
