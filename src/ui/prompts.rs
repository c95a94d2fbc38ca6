//! Interactive prompts with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{AvakitError, AvakitResult};

/// Prompt for confirmation, returns default if non-interactive or auto-yes
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> AvakitResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    // cliclack blocks on stdin
    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| AvakitError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| AvakitError::User(format!("Prompt failed: {}", e)))
}

/// Prompt for a secret without echoing it
///
/// Returns `None` when there is no terminal to prompt on.
pub async fn password(ctx: &UiContext, message: &str) -> AvakitResult<Option<String>> {
    if !ctx.is_interactive() {
        return Ok(None);
    }

    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::password(&message).mask('▪').interact()
    })
    .await
    .map_err(|e| AvakitError::User(format!("Prompt task failed: {}", e)))?;

    result
        .map(Some)
        .map_err(|e| AvakitError::User(format!("Prompt failed: {}", e)))
}
