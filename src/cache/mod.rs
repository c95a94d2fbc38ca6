//! Catalog response cache
//!
//! Keeps the last fetched avatar and voice catalogs per platform so screens
//! can render without a network round trip.
//!
//! # Entry States
//!
//! | State | `valid` | `data` | Description |
//! |-------|---------|--------|-------------|
//! | Miss | false | none | Nothing stored (or stored entry unreadable) |
//! | Expired | false | none | Older than the TTL, or timestamp unusable |
//! | Fresh | true | items | Within the TTL |
//!
//! Expired entries are left in place; the next successful fetch overwrites
//! them.

pub mod catalog;
pub mod entry;
pub mod response;

pub use catalog::{CatalogService, CatalogSource};
pub use entry::{cache_key, format_age, CacheEntry, CacheLookup, ResourceKind};
pub use response::ResponseCache;
