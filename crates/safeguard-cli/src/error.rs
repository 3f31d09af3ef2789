//! Error types for the CLI application.

use safeguard_moderator::ModerationError;
use safeguard_safety::SafetyError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Moderation failed, the submission must not be published
    #[error("Moderation could not be determined: {0}")]
    Moderation(#[from] ModerationError),

    /// Classifier client error
    #[error("Classifier error: {0}")]
    Safety(#[from] SafetyError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    /// Background evaluation task failed
    #[error("Evaluation task failed: {0}")]
    Task(String),
}
