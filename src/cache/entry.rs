//! Cache entry and lookup types

use crate::error::{AvakitError, AvakitResult};
use crate::platform::PlatformId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Category of cached catalog data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Avatars,
    Voices,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Avatars, ResourceKind::Voices];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avatars => "avatars",
            Self::Voices => "voices",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AvakitError;

    fn from_str(s: &str) -> AvakitResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "avatars" | "avatar" => Ok(Self::Avatars),
            "voices" | "voice" => Ok(Self::Voices),
            other => Err(AvakitError::UnknownResourceKind(other.to_string())),
        }
    }
}

/// Store key for a (kind, platform) pair: `<kind>_cache_<platform>`
pub fn cache_key(kind: ResourceKind, platform: PlatformId) -> String {
    format!("{}_cache_{}", kind.as_str(), platform.as_str())
}

/// Persisted snapshot of one catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    /// Platform the items were fetched from
    pub platform: PlatformId,

    /// Items in fetch order, already truncated to the kind's bound
    pub items: Vec<T>,

    /// When the snapshot was written
    pub saved_at: DateTime<Utc>,
}

/// Borrowed form used on the write path to avoid cloning the items
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CacheEntryRef<'a, T> {
    pub platform: PlatformId,
    pub items: &'a [T],
    pub saved_at: DateTime<Utc>,
}

/// Result of a cache read
#[derive(Debug, Clone, PartialEq)]
pub struct CacheLookup<T> {
    /// True iff an entry exists and is within its TTL
    pub valid: bool,

    /// Cached items, only present when `valid`
    pub data: Option<Vec<T>>,

    /// Age of the stored entry, when it could be determined
    pub age: Option<Duration>,
}

impl<T> CacheLookup<T> {
    /// Nothing stored under the key
    pub fn miss() -> Self {
        Self {
            valid: false,
            data: None,
            age: None,
        }
    }

    /// Entry exists but is too old (or its age is unknown)
    pub fn expired(age: Option<Duration>) -> Self {
        Self {
            valid: false,
            data: None,
            age,
        }
    }

    /// Fresh entry
    pub fn hit(items: Vec<T>, age: Duration) -> Self {
        Self {
            valid: true,
            data: Some(items),
            age: Some(age),
        }
    }

    /// Take the items if the lookup was a valid hit
    pub fn into_data(self) -> Option<Vec<T>> {
        if self.valid {
            self.data
        } else {
            None
        }
    }
}

/// Format an entry age for display (e.g. "3h 12m")
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    let (hours, mins) = (secs / 3600, (secs % 3600) / 60);

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m", mins)
    } else {
        format!("{}s", secs)
    }
}
