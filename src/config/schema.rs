//! Configuration schema for avakit
//!
//! Configuration is stored at `~/.config/avakit/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Catalog cache settings
    pub cache: CacheConfig,

    /// Key validation settings
    pub validator: ValidatorConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Catalog cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Default time-to-live for cached catalogs, in hours
    pub ttl_hours: u64,

    /// Maximum number of avatars kept per platform
    pub max_avatars: usize,

    /// Maximum number of voices kept per platform
    pub max_voices: usize,

    /// Override the cache directory (defaults to the state dir)
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 24,
            max_avatars: 100,
            max_voices: 200,
            dir: None,
        }
    }
}

/// Key validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Per-attempt HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Total probe attempts when no response is received
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds
    pub initial_backoff_ms: u64,

    /// Multiplier applied to the delay after each retry
    pub backoff_multiplier: f64,

    /// Report HTTP 403 as UNAUTHORIZED instead of KEY_INVALID
    pub forbidden_as_unauthorized: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_attempts: 2,
            initial_backoff_ms: 1000,
            backoff_multiplier: 2.0,
            forbidden_as_unauthorized: false,
        }
    }
}
