//! avakit - API key validation and catalog caching
//!
//! CLI entry point that dispatches to subcommands.

use avakit::cli::{Cli, Commands};
use avakit::config::{Config, ConfigManager};
use avakit::error::AvakitResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AvakitResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using config at {}", config_manager.path().display());

    match cli.command {
        Commands::Validate(args) => avakit::cli::commands::validate(args, &config).await,
        Commands::Key(args) => avakit::cli::commands::key(args, &config).await,
        Commands::Cache(args) => avakit::cli::commands::cache(args, &config).await,
        Commands::Platforms => avakit::cli::commands::platforms().await,
        Commands::Config(args) => {
            avakit::cli::commands::config(args, &config_manager, &config).await
        }
    }
}

/// 0 = warn (spinners only), 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let level = match verbose {
        0 if config.general.verbose => "info",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::new(format!("avakit={}", level));

    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }
}
