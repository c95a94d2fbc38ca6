//! Validation outcome and failure taxonomy

use crate::platform::PlatformId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a key failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// No response: DNS, connect or reset
    Network,
    /// No response within the per-attempt timeout
    Timeout,
    /// Key rejected (401, and 403 by default)
    KeyInvalid,
    /// Key recognised but not permitted (403 when configured)
    Unauthorized,
    /// HTTP 429
    RateLimited,
    /// HTTP 5xx
    ServerError,
    /// Empty input, no request made
    Validation,
    /// Anything else
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "NETWORK",
            Self::Timeout => "TIMEOUT",
            Self::KeyInvalid => "KEY_INVALID",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::RateLimited => "RATE_LIMITED",
            Self::ServerError => "SERVER_ERROR",
            Self::Validation => "VALIDATION",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of validating one key against one platform
///
/// Either valid with no error kind, or invalid with one. Fields are private
/// so the two shapes can only be built through the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    is_valid: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
}

impl ValidationOutcome {
    /// Key accepted
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
            error_kind: None,
        }
    }

    /// Key rejected or could not be checked
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            error_kind: Some(kind),
        }
    }

    /// Failure with the standard user-facing message for `kind`
    pub fn from_kind(kind: ErrorKind, platform: PlatformId) -> Self {
        let message = match kind {
            ErrorKind::Network => format!(
                "Could not reach {}. Check your internet connection and try again.",
                platform
            ),
            ErrorKind::Timeout => format!("{} did not respond in time. Try again later.", platform),
            ErrorKind::KeyInvalid => format!("The API key was rejected by {}.", platform),
            ErrorKind::Unauthorized => format!(
                "The API key is not authorized for this {} endpoint.",
                platform
            ),
            ErrorKind::RateLimited => format!(
                "Too many requests: {} rate limit reached. Wait a moment and retry.",
                platform
            ),
            ErrorKind::ServerError => {
                format!("{} is having problems right now. Try again later.", platform)
            }
            ErrorKind::Validation => "Please enter an API key.".to_string(),
            ErrorKind::Unknown => format!("Unexpected error while validating the {} key.", platform),
        };
        Self::failure(kind, message)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }
}
