//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use safeguard_safety::{ContentSafetyConfig, OutputType};
use std::path::Path;

/// Execute the profile command, saving `config` to `path` after changes.
pub fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let message = match args.action {
        ProfileAction::List => {
            println!("{}", list_profiles(config, formatter));
            return Ok(());
        }
        ProfileAction::Show => {
            println!("{}", show_active_profile(config, formatter)?);
            return Ok(());
        }
        ProfileAction::Switch { name } => switch_profile(config, name)?,
        ProfileAction::Set {
            name,
            url,
            key,
            api_version,
            timeout,
            max_attempts,
            eight_levels,
        } => {
            let mut profile = ContentSafetyConfig::new(url, key);
            if let Some(api_version) = api_version {
                profile.api_version = api_version;
            }
            if let Some(timeout) = timeout {
                profile.timeout_secs = timeout;
            }
            if let Some(max_attempts) = max_attempts {
                profile.max_attempts = max_attempts;
            }
            if eight_levels {
                profile.output_type = OutputType::EightSeverityLevels;
            }
            set_profile(config, name, profile)?
        }
        ProfileAction::Delete { name } => match delete_profile(config, name)? {
            Some(message) => message,
            None => return Ok(()),
        },
    };

    config.save_to(path)?;
    println!("{}", formatter.success(&message));
    Ok(())
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> String {
    if config.profiles.is_empty() {
        return formatter.info("No profiles configured");
    }

    let mut lines = vec!["Available profiles:".to_string()];
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            lines.push(format!("* {}", formatter.success(name)));
        } else {
            lines.push(format!("  {}", name));
        }
        lines.push(format!("    Endpoint: {}", profile.endpoint));
        lines.push(format!("    API version: {}", profile.api_version));
    }

    lines.join("\n")
}

/// Show the active profile. The key is never printed.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<String> {
    let profile = config.get_active_profile()?;

    Ok([
        format!("Active profile: {}", formatter.success(&config.active_profile)),
        format!("  Endpoint: {}", profile.endpoint),
        format!("  API key: {}", redact(&profile.api_key)),
        format!("  API version: {}", profile.api_version),
        format!("  Output type: {:?}", profile.output_type),
        format!("  Timeout: {}s", profile.timeout_secs),
        format!("  Max attempts: {}", profile.max_attempts),
    ]
    .join("\n"))
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String) -> Result<String> {
    config.switch_profile(name.clone())?;
    Ok(format!("Switched to profile '{}'", name))
}

/// Create or update a profile.
fn set_profile(config: &mut Config, name: String, profile: ContentSafetyConfig) -> Result<String> {
    profile.validate()?;

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    Ok(format!("{} profile '{}'", action, name))
}

/// Delete a profile. Returns `None` when there was nothing to delete.
fn delete_profile(config: &mut Config, name: String) -> Result<Option<String>> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        Ok(Some(format!("Deleted profile '{}'", name)))
    } else {
        eprintln!("Profile '{}' does not exist", name);
        Ok(None)
    }
}

fn redact(key: &str) -> String {
    if key.is_empty() {
        "(not set)".to_string()
    } else {
        "********".to_string()
    }
}
