//! Validate command - check an API key against its platform

use super::{open_secrets, resolve_key};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::credentials::{
    key_fingerprint, CredentialValidator, ErrorKind, SecretStore, ValidationOutcome,
};
use crate::error::{AvakitError, AvakitResult};
use crate::platform::PlatformId;
use crate::ui::{self, Status, UiContext};
use tracing::debug;

/// Execute the validate command
pub async fn execute(args: ValidateArgs, config: &Config) -> AvakitResult<()> {
    let ctx = UiContext::detect();
    let key = resolve_key(&ctx, args.platform, args.key).await?;
    let validator = CredentialValidator::with_config(&config.validator);
    let check = validator.validate(args.platform, &key);

    let outcome = match args.format {
        OutputFormat::Json => {
            let outcome = check.await;
            print_outcome_json(args.platform, &outcome)?;
            outcome
        }
        OutputFormat::Text => {
            let message = format!("Checking key against {}...", args.platform);
            ui::spin(&ctx, &message, check, verdict).await
        }
    };

    if !outcome.is_valid() {
        return Err(AvakitError::ValidationFailed {
            platform: args.platform.to_string(),
            kind: outcome.error_kind().unwrap_or(ErrorKind::Unknown),
        });
    }

    if args.save {
        let secrets = open_secrets().await?;
        secrets.save_key(args.platform, &key).await?;
        debug!("Stored key {} for {}", key_fingerprint(&key), args.platform);
        if args.format == OutputFormat::Text {
            ui::report(&ctx, Status::Ok, &format!("Key saved for {}", args.platform), None);
        }
    }

    Ok(())
}

/// Spinner verdict for a finished validation
pub(crate) fn verdict(outcome: &ValidationOutcome) -> (Status, String) {
    let status = if outcome.is_valid() {
        Status::Ok
    } else {
        Status::Fail
    };
    (status, outcome.message().to_string())
}

fn print_outcome_json(platform: PlatformId, outcome: &ValidationOutcome) -> AvakitResult<()> {
    #[derive(serde::Serialize)]
    struct OutcomeJson<'a> {
        platform: &'a str,
        #[serde(flatten)]
        outcome: &'a ValidationOutcome,
    }

    let json = OutcomeJson {
        platform: platform.as_str(),
        outcome,
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
