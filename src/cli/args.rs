//! CLI argument definitions using clap derive

use crate::cache::ResourceKind;
use crate::platform::PlatformId;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// avakit - API key validation and catalog caching
///
/// Checks API keys against AI avatar and voice platforms and manages the
/// local catalog cache.
#[derive(Parser, Debug)]
#[command(name = "avakit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "AVAKIT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check an API key against a platform
    Validate(ValidateArgs),

    /// Manage stored API keys
    Key(KeyArgs),

    /// Inspect or clear cached catalogs
    Cache(CacheArgs),

    /// List supported platforms
    Platforms,

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Platform id (platformA, platformB, platformC)
    #[arg(value_parser = parse_platform)]
    pub platform: PlatformId,

    /// API key to check (prompted for when omitted)
    #[arg(short, long, env = "AVAKIT_API_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Store the key if it is valid
    #[arg(long)]
    pub save: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the key command
#[derive(Parser, Debug)]
pub struct KeyArgs {
    #[command(subcommand)]
    pub action: KeyAction,
}

/// Key subcommands
#[derive(Subcommand, Debug)]
pub enum KeyAction {
    /// Validate and store a key
    Set {
        /// Platform id
        #[arg(value_parser = parse_platform)]
        platform: PlatformId,

        /// API key (prompted for when omitted)
        key: Option<String>,

        /// Store without probing the platform
        #[arg(long)]
        skip_validation: bool,
    },

    /// Show the stored key, masked
    Show {
        /// Platform id
        #[arg(value_parser = parse_platform)]
        platform: PlatformId,
    },

    /// Delete the stored key
    Remove {
        /// Platform id
        #[arg(value_parser = parse_platform)]
        platform: PlatformId,
    },
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show the cached catalog for a platform
    Show {
        /// Resource kind (avatars, voices)
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,

        /// Platform id
        #[arg(value_parser = parse_platform)]
        platform: PlatformId,

        /// Treat entries older than this as expired (default: from config)
        #[arg(long)]
        ttl_hours: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Store a catalog from a JSON array file
    Import {
        /// Resource kind (avatars, voices)
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,

        /// Platform id
        #[arg(value_parser = parse_platform)]
        platform: PlatformId,

        /// File containing a JSON array of items
        file: PathBuf,
    },

    /// Clear one cached catalog
    Clear {
        /// Resource kind (avatars, voices)
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,

        /// Platform id
        #[arg(value_parser = parse_platform)]
        platform: PlatformId,
    },

    /// Clear every cached catalog for a platform
    ClearAll {
        /// Platform id
        #[arg(value_parser = parse_platform)]
        platform: PlatformId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the default cache TTL
    Ttl,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.ttl_hours)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Text,
    /// JSON output
    Json,
}

fn parse_platform(s: &str) -> Result<PlatformId, String> {
    s.parse().map_err(|e: crate::error::AvakitError| e.to_string())
}

fn parse_kind(s: &str) -> Result<ResourceKind, String> {
    s.parse().map_err(|e: crate::error::AvakitError| e.to_string())
}
