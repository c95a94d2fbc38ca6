//! avakit - API key validation and catalog caching
//!
//! Checks user-supplied API keys against AI avatar and voice platforms and
//! keeps a TTL-bounded local cache of their catalogs.

pub mod cache;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod platform;
pub mod store;
pub mod ui;

pub use cache::{CacheLookup, CatalogService, ResourceKind, ResponseCache};
pub use credentials::{CredentialValidator, ErrorKind, ValidationOutcome};
pub use error::{AvakitError, AvakitResult};
pub use platform::PlatformId;
