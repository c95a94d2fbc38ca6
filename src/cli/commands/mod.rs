//! CLI command implementations

pub mod cache;
pub mod config;
pub mod key;
pub mod platforms;
pub mod validate;

pub use cache::execute as cache;
pub use config::execute as config;
pub use key::execute as key;
pub use platforms::execute as platforms;
pub use validate::execute as validate;

use crate::cache::ResponseCache;
use crate::config::{Config, ConfigManager};
use crate::credentials::FileSecretStore;
use crate::error::{AvakitError, AvakitResult};
use crate::platform::PlatformId;
use crate::store::FileStore;
use crate::ui::{self, UiContext};
use std::sync::Arc;

/// Open the on-disk catalog cache configured for this run
pub(crate) async fn open_cache(config: &Config) -> AvakitResult<ResponseCache> {
    let store = FileStore::open(ConfigManager::cache_dir(config)).await?;
    Ok(ResponseCache::new(Arc::new(store), &config.cache))
}

/// Open the on-disk key store
pub(crate) async fn open_secrets() -> AvakitResult<FileSecretStore> {
    FileSecretStore::open(ConfigManager::keys_dir()).await
}

/// Resolve a key from the command line, or prompt for one
pub(crate) async fn resolve_key(
    ctx: &UiContext,
    platform: PlatformId,
    key: Option<String>,
) -> AvakitResult<String> {
    if let Some(key) = key {
        return Ok(key);
    }

    let prompt = format!("API key for {}", platform);
    ui::password(ctx, &prompt).await?.ok_or_else(|| {
        AvakitError::User(format!(
            "No API key given for {}. Pass --key or set AVAKIT_API_KEY",
            platform
        ))
    })
}
