//! Key command - store, show and remove API keys

use super::validate::verdict;
use super::{open_secrets, resolve_key};
use crate::cli::args::{KeyAction, KeyArgs};
use crate::config::Config;
use crate::credentials::{key_fingerprint, mask_key, CredentialValidator, ErrorKind, SecretStore};
use crate::error::{AvakitError, AvakitResult};
use crate::platform::PlatformId;
use crate::ui::{self, Status, UiContext};

/// Execute the key command
pub async fn execute(args: KeyArgs, config: &Config) -> AvakitResult<()> {
    let ctx = UiContext::detect();
    let secrets = open_secrets().await?;

    match args.action {
        KeyAction::Set {
            platform,
            key,
            skip_validation,
        } => set_key(&ctx, &secrets, config, platform, key, skip_validation).await,
        KeyAction::Show { platform } => show_key(&ctx, &secrets, platform).await,
        KeyAction::Remove { platform } => remove_key(&ctx, &secrets, platform).await,
    }
}

async fn set_key(
    ctx: &UiContext,
    secrets: &dyn SecretStore,
    config: &Config,
    platform: PlatformId,
    key: Option<String>,
    skip_validation: bool,
) -> AvakitResult<()> {
    let key = resolve_key(ctx, platform, key).await?;
    let key = key.trim();
    if key.is_empty() {
        return Err(AvakitError::User("API key must not be empty".to_string()));
    }

    if !skip_validation {
        let validator = CredentialValidator::with_config(&config.validator);
        let message = format!("Checking key against {}...", platform);
        let outcome = ui::spin(ctx, &message, validator.validate(platform, key), verdict).await;

        if !outcome.is_valid() {
            return Err(AvakitError::ValidationFailed {
                platform: platform.to_string(),
                kind: outcome.error_kind().unwrap_or(ErrorKind::Unknown),
            });
        }
    }

    secrets.save_key(platform, key).await?;
    ui::report(
        ctx,
        Status::Ok,
        &format!("Key saved for {}", platform),
        Some(&key_fingerprint(key)),
    );
    if skip_validation {
        ui::note(ctx, "Key was not checked against the platform");
    }

    Ok(())
}

async fn show_key(ctx: &UiContext, secrets: &dyn SecretStore, platform: PlatformId) -> AvakitResult<()> {
    let key = secrets
        .get_key(platform)
        .await?
        .ok_or_else(|| AvakitError::KeyNotConfigured(platform.to_string()))?;

    ui::heading(ctx, &format!("{} key", platform));
    ui::field(ctx, "Key", &mask_key(&key), None);
    ui::field(ctx, "Fingerprint", &key_fingerprint(&key), None);
    Ok(())
}

async fn remove_key(ctx: &UiContext, secrets: &dyn SecretStore, platform: PlatformId) -> AvakitResult<()> {
    let existed = secrets.get_key(platform).await?.is_some();
    secrets.remove_key(platform).await?;

    if existed {
        ui::report(ctx, Status::Ok, &format!("Removed key for {}", platform), None);
    } else {
        ui::report(
            ctx,
            Status::Warn,
            &format!("No key stored for {}", platform),
            Some("nothing to remove"),
        );
    }
    Ok(())
}
