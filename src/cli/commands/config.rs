//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{AvakitError, AvakitResult};
use crate::ui::{self, Status, UiContext};
use std::path::PathBuf;

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> AvakitResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> AvakitResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> AvakitResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::report(
            &ctx,
            Status::Warn,
            &format!("Config already exists at {}", path.display()),
            Some("use --force to overwrite"),
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::report(
        &ctx,
        Status::Ok,
        "Configuration initialized",
        Some(&path.display().to_string()),
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> AvakitResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();

    if let Err(e) = apply_value(&mut config, key, value) {
        if matches!(e, AvakitError::User(ref m) if m.starts_with("Unknown config key")) {
            ui::report(&ctx, Status::Fail, "Unknown config key", Some(key));
            ui::note(&ctx, "Valid keys:");
            print_valid_keys();
            return Ok(());
        }
        return Err(e);
    }

    manager.save(&config).await?;
    ui::report(&ctx, Status::Ok, &format!("Set {} = {}", key, value), None);

    Ok(())
}

/// Apply one dot-separated `key = value` pair to `config`
fn apply_value(config: &mut Config, key: &str, value: &str) -> AvakitResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => {
                return Err(AvakitError::User(format!(
                    "Invalid log format: {}. Use text/json",
                    value
                )))
            }
        },

        ["cache", "ttl_hours"] => config.cache.ttl_hours = parse_number(value)?,
        ["cache", "max_avatars"] => config.cache.max_avatars = parse_number(value)?,
        ["cache", "max_voices"] => config.cache.max_voices = parse_number(value)?,
        ["cache", "dir"] => {
            config.cache.dir = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            }
        }

        ["validator", "timeout_secs"] => config.validator.timeout_secs = parse_number(value)?,
        ["validator", "max_attempts"] => config.validator.max_attempts = parse_number(value)?,
        ["validator", "initial_backoff_ms"] => {
            config.validator.initial_backoff_ms = parse_number(value)?
        }
        ["validator", "backoff_multiplier"] => {
            config.validator.backoff_multiplier = parse_number(value)?
        }
        ["validator", "forbidden_as_unauthorized"] => {
            config.validator.forbidden_as_unauthorized = parse_bool(value)?
        }

        _ => return Err(AvakitError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}

fn parse_bool(value: &str) -> AvakitResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AvakitError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> AvakitResult<T> {
    value
        .parse()
        .map_err(|_| AvakitError::User(format!("Invalid number: {}", value)))
}

fn print_valid_keys() {
    let keys = [
        "general.verbose",
        "general.log_format",
        "cache.ttl_hours",
        "cache.max_avatars",
        "cache.max_voices",
        "cache.dir",
        "validator.timeout_secs",
        "validator.max_attempts",
        "validator.initial_backoff_ms",
        "validator.backoff_multiplier",
        "validator.forbidden_as_unauthorized",
    ];

    for key in keys {
        eprintln!("  {}", key);
    }
}
