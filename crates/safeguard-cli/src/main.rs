//! Safeguard CLI - Moderate text submissions with a hosted content-safety service.

use anyhow::Context;
use clap::Parser;
use safeguard_cli::cli::Cli;
use safeguard_cli::{commands, repl, Command, Config, Formatter};
use safeguard_moderator::ModerationDecider;
use safeguard_safety::ContentSafetyClient;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// `RUST_LOG` wins; otherwise warn, raised by each `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let command = match cli.command {
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &config_path, &formatter)?;
            return Ok(0);
        }
        other => other,
    };

    let service = config.resolve_service(
        cli.profile.as_deref(),
        cli.endpoint.as_deref(),
        cli.api_key.as_deref(),
    )?;
    let client = ContentSafetyClient::new(service).context("Failed to create classifier client")?;
    let decider = ModerationDecider::new(client);

    let code = match command {
        Some(Command::Check(args)) => commands::execute_check(args, &decider, &formatter)
            .await?
            .exit_code(),
        Some(Command::Batch(args)) => commands::execute_batch(args, Arc::new(decider), &formatter)
            .await?
            .exit_code(),
        Some(Command::Profile(_)) | Some(Command::Repl) | None => {
            repl::run_repl(&decider, &config, &formatter).await?;
            0
        }
    };

    Ok(code)
}
