//! Error types for avakit
//!
//! Expected outcomes (a rejected key, a stale cache entry) are plain data and
//! never show up here. `AvakitError` is for faults: store IO, configuration,
//! serialization, and user input the CLI cannot act on.

use crate::credentials::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for avakit operations
pub type AvakitResult<T> = Result<T, AvakitError>;

/// All errors that can occur in avakit
#[derive(Error, Debug)]
pub enum AvakitError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Platform / key errors
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Unknown resource kind: {0}")]
    UnknownResourceKind(String),

    #[error("No API key configured for {0}")]
    KeyNotConfigured(String),

    #[error("Key validation failed for {platform}: {kind}")]
    ValidationFailed { platform: String, kind: ErrorKind },

    // Store errors
    #[error("Store error on {key}: {reason}")]
    Store { key: String, reason: String },

    #[error("Catalog fetch failed for {platform}: {reason}")]
    CatalogFetch { platform: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl AvakitError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a store error for a given key
    pub fn store(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Store {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from the persistence layer
    ///
    /// Callers of the cache treat these as a miss and go to the network.
    pub fn is_store_fault(&self) -> bool {
        matches!(self, Self::Store { .. } | Self::Io { .. } | Self::Json(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownPlatform(_) => Some("Run: avakit platforms"),
            Self::UnknownResourceKind(_) => Some("Valid kinds: avatars, voices"),
            Self::KeyNotConfigured(_) => Some("Run: avakit key set <platform>"),
            Self::ValidationFailed { kind, .. } => match kind {
                ErrorKind::RateLimited => Some("Wait a minute before validating again"),
                ErrorKind::KeyInvalid => Some("Copy the key again from the platform dashboard"),
                ErrorKind::Network | ErrorKind::Timeout => {
                    Some("Check your connection, then run the command again")
                }
                _ => None,
            },
            Self::ConfigInvalid { .. } => Some("Run: avakit config init --force"),
            _ => None,
        }
    }
}
