//! Supported upstream platforms and their probe contracts
//!
//! The table is static: each platform has one base URL, one cheap
//! authenticated read endpoint used for key probes, and one auth-header
//! convention.

use crate::error::{AvakitError, AvakitResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upstream avatar / voice platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformId {
    #[serde(rename = "platformA")]
    PlatformA,
    #[serde(rename = "platformB")]
    PlatformB,
    #[serde(rename = "platformC")]
    PlatformC,
}

/// How a platform expects the API key to be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Basic base64(key + ":")`
    BasicToken,
    /// Raw key in a named header
    Header(&'static str),
}

/// Fixed endpoint description for one platform
#[derive(Debug, Clone, Copy)]
pub struct PlatformSpec {
    pub id: PlatformId,
    pub base_url: &'static str,
    pub probe_path: &'static str,
    pub auth: AuthScheme,
}

const PLATFORMS: [PlatformSpec; 3] = [
    PlatformSpec {
        id: PlatformId::PlatformA,
        base_url: "https://api.platformA.example",
        probe_path: "/credits",
        auth: AuthScheme::BasicToken,
    },
    PlatformSpec {
        id: PlatformId::PlatformB,
        base_url: "https://api.platformB.example",
        probe_path: "/v2/avatars",
        auth: AuthScheme::Header("X-Api-Key"),
    },
    PlatformSpec {
        id: PlatformId::PlatformC,
        base_url: "https://api.platformC.example",
        probe_path: "/v1/user",
        auth: AuthScheme::Header("xi-api-key"),
    },
];

impl PlatformId {
    /// Every supported platform, in table order
    pub const ALL: [PlatformId; 3] = [
        PlatformId::PlatformA,
        PlatformId::PlatformB,
        PlatformId::PlatformC,
    ];

    /// Stable identifier used in cache keys, file names and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlatformA => "platformA",
            Self::PlatformB => "platformB",
            Self::PlatformC => "platformC",
        }
    }

    /// Static endpoint table entry for this platform
    pub fn spec(&self) -> &'static PlatformSpec {
        match self {
            Self::PlatformA => &PLATFORMS[0],
            Self::PlatformB => &PLATFORMS[1],
            Self::PlatformC => &PLATFORMS[2],
        }
    }

    /// Full URL of the probe endpoint
    pub fn probe_url(&self) -> String {
        let spec = self.spec();
        format!("{}{}", spec.base_url, spec.probe_path)
    }

    /// Build the auth header for a key, as `(name, value)`
    pub fn auth_header(&self, key: &str) -> (String, String) {
        match self.spec().auth {
            AuthScheme::BasicToken => {
                let token = STANDARD.encode(format!("{}:", key));
                ("Authorization".to_string(), format!("Basic {}", token))
            }
            AuthScheme::Header(name) => (name.to_string(), key.to_string()),
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformId {
    type Err = AvakitError;

    fn from_str(s: &str) -> AvakitResult<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AvakitError::UnknownPlatform(s.to_string()))
    }
}
