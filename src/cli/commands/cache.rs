//! Cache command - inspect and clear cached catalogs

use super::open_cache;
use crate::cache::{cache_key, format_age, CacheLookup, ResourceKind, ResponseCache};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::{AvakitError, AvakitResult};
use crate::platform::PlatformId;
use crate::ui::{self, Status, UiContext};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, warn};

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> AvakitResult<()> {
    let cache = open_cache(config).await?;

    match args.action {
        CacheAction::Show {
            kind,
            platform,
            ttl_hours,
            format,
        } => show_cache(&cache, kind, platform, ttl_hours, format).await,
        CacheAction::Import {
            kind,
            platform,
            file,
        } => import_cache(&cache, kind, platform, &file).await,
        CacheAction::Clear { kind, platform } => clear_cache(&cache, kind, platform).await,
        CacheAction::ClearAll { platform, yes } => clear_all_caches(&cache, platform, yes).await,
        CacheAction::Ttl => {
            println!("{}", cache.ttl_hours());
            Ok(())
        }
    }
}

async fn show_cache(
    cache: &ResponseCache,
    kind: ResourceKind,
    platform: PlatformId,
    ttl_hours: Option<u64>,
    format: OutputFormat,
) -> AvakitResult<()> {
    let ttl_hours = ttl_hours.unwrap_or_else(|| cache.ttl_hours());
    let ttl = Duration::from_secs(ttl_hours.saturating_mul(3600));
    let lookup = lookup_or_miss(cache, kind, platform, ttl).await;

    if format == OutputFormat::Json {
        #[derive(serde::Serialize)]
        struct LookupJson<'a> {
            kind: &'a str,
            platform: &'a str,
            valid: bool,
            age_secs: Option<u64>,
            data: Option<&'a [Value]>,
        }

        let json = LookupJson {
            kind: kind.as_str(),
            platform: platform.as_str(),
            valid: lookup.valid,
            age_secs: lookup.age.map(|a| a.as_secs()),
            data: lookup.data.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    let ctx = UiContext::detect();
    ui::heading(&ctx, &format!("{} for {}", kind, platform));

    let (state, status) = match (lookup.valid, lookup.age) {
        (true, _) => ("fresh", Status::Ok),
        (false, Some(_)) => ("expired", Status::Warn),
        (false, None) => ("missing", Status::Warn),
    };
    ui::field(&ctx, "State", state, Some(status));
    ui::field(&ctx, "TTL", &format!("{}h", ttl_hours), None);
    if let Some(age) = lookup.age {
        ui::field(&ctx, "Age", &format_age(age), None);
    }
    if let Some(items) = &lookup.data {
        ui::field(
            &ctx,
            "Items",
            &format!("{} (max {})", items.len(), cache.max_items(kind)),
            None,
        );
    }

    Ok(())
}

/// Read a catalog, reporting an unreadable store as a miss
async fn lookup_or_miss(
    cache: &ResponseCache,
    kind: ResourceKind,
    platform: PlatformId,
    ttl: Duration,
) -> CacheLookup<Value> {
    match cache.get_with_ttl(kind, platform, ttl).await {
        Ok(lookup) => lookup,
        Err(e) => {
            warn!("Cache read for {} failed: {}", cache_key(kind, platform), e);
            CacheLookup::miss()
        }
    }
}

async fn import_cache(
    cache: &ResponseCache,
    kind: ResourceKind,
    platform: PlatformId,
    file: &Path,
) -> AvakitResult<()> {
    let ctx = UiContext::detect();

    let content = fs::read_to_string(file)
        .await
        .map_err(|e| AvakitError::io(format!("reading {}", file.display()), e))?;

    let items: Vec<Value> = match serde_json::from_str(&content)? {
        Value::Array(items) => items,
        _ => {
            return Err(AvakitError::User(format!(
                "{} must contain a JSON array",
                file.display()
            )))
        }
    };
    debug!("Importing {} items from {}", items.len(), file.display());

    if !cache.put(kind, platform, &items).await {
        return Err(AvakitError::store(
            cache_key(kind, platform),
            "write failed, see log for details",
        ));
    }

    let kept = items.len().min(cache.max_items(kind));
    if kept < items.len() {
        ui::report(
            &ctx,
            Status::Warn,
            &format!("Cached {} of {} {}", kept, items.len(), kind),
            Some(&format!("limit for {} is {}", kind, cache.max_items(kind))),
        );
    } else {
        ui::report(&ctx, Status::Ok, &format!("Cached {} {} for {}", kept, kind, platform), None);
    }

    Ok(())
}

async fn clear_cache(cache: &ResponseCache, kind: ResourceKind, platform: PlatformId) -> AvakitResult<()> {
    let ctx = UiContext::detect();

    if cache.clear(kind, platform).await {
        ui::report(&ctx, Status::Ok, &format!("Cleared {} for {}", kind, platform), None);
        Ok(())
    } else {
        ui::report(&ctx, Status::Fail, &format!("Could not clear {} for {}", kind, platform), None);
        Err(AvakitError::store(
            cache_key(kind, platform),
            "remove failed, see log for details",
        ))
    }
}

async fn clear_all_caches(cache: &ResponseCache, platform: PlatformId, yes: bool) -> AvakitResult<()> {
    let ctx = UiContext::detect().with_auto_yes(yes);

    let confirmed = ui::confirm(
        &ctx,
        &format!("Clear every cached catalog for {}?", platform),
        false,
    )
    .await?;

    if !confirmed {
        ui::note(&ctx, "Cancelled. Pass --yes to skip the prompt.");
        return Ok(());
    }

    if cache.clear_all(platform).await {
        ui::report(&ctx, Status::Ok, &format!("Cleared all catalogs for {}", platform), None);
        Ok(())
    } else {
        ui::report(
            &ctx,
            Status::Fail,
            "Some catalogs could not be cleared",
            Some(platform.as_str()),
        );
        Err(AvakitError::User(format!(
            "Clearing caches for {} was incomplete",
            platform
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::CacheConfig;
    use crate::store::FileStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn unreadable_entry_shows_as_missing() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).await.unwrap();
        std::fs::write(temp.path().join("avatars_cache_platformA.json"), "{not json").unwrap();
        let cache = ResponseCache::new(Arc::new(store), &CacheConfig::default());

        let lookup = lookup_or_miss(
            &cache,
            ResourceKind::Avatars,
            PlatformId::PlatformA,
            Duration::from_secs(3600),
        )
        .await;
        assert_eq!(lookup, CacheLookup::miss());
    }
}
