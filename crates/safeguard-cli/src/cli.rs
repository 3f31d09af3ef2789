//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Safeguard CLI - Moderate text submissions with a hosted content-safety service.
#[derive(Debug, Parser)]
#[command(name = "safeguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Service endpoint, overrides the profile
    #[arg(long, env = "CONTENT_SAFETY_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Subscription key, overrides the profile
    #[arg(long, env = "CONTENT_SAFETY_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (verdict only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Moderate a single submission
    Check(CheckArgs),

    /// Moderate every line of a file
    Batch(BatchArgs),

    /// Manage service profiles
    Profile(ProfileArgs),

    /// Enter the interactive comment board
    Repl,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Submission text
    pub text: Option<String>,

    /// Read the submission from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Show every category severity
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the batch command.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    /// File with one submission per line
    #[arg(long)]
    pub file: PathBuf,

    /// Maximum evaluations in flight
    #[arg(long, default_value = "4")]
    pub concurrency: usize,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Service endpoint
        #[arg(short, long)]
        url: String,
        /// Subscription key
        #[arg(short, long)]
        key: String,
        /// API version
        #[arg(long)]
        api_version: Option<String>,
        /// Request timeout (seconds)
        #[arg(long)]
        timeout: Option<u64>,
        /// Attempts per request, including the first
        #[arg(long)]
        max_attempts: Option<u32>,
        /// Request the 0-7 severity scale
        #[arg(long)]
        eight_levels: bool,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_is_repl() {
        let cli = Cli::parse_from(["safeguard"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["safeguard", "check", "hello there", "--detailed"]);
        match cli.command {
            Some(Command::Check(args)) => {
                assert_eq!(args.text.as_deref(), Some("hello there"));
                assert!(args.detailed);
                assert!(!args.stdin);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_batch_command_defaults() {
        let cli = Cli::parse_from(["safeguard", "batch", "--file", "comments.txt"]);
        match cli.command {
            Some(Command::Batch(args)) => {
                assert_eq!(args.file, PathBuf::from("comments.txt"));
                assert_eq!(args.concurrency, 4);
            }
            _ => panic!("Expected Batch command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "safeguard",
            "check",
            "hi",
            "-vv",
            "--format",
            "json",
            "--endpoint",
            "https://example.com",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.endpoint.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_profile_set() {
        let cli = Cli::parse_from([
            "safeguard", "profile", "set", "prod", "--url", "https://example.com", "--key", "k",
            "--eight-levels",
        ]);
        match cli.command {
            Some(Command::Profile(ProfileArgs {
                action: ProfileAction::Set { name, eight_levels, .. },
            })) => {
                assert_eq!(name, "prod");
                assert!(eight_levels);
            }
            _ => panic!("Expected Profile Set command"),
        }
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
