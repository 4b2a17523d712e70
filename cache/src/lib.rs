//! Signed work-hash cache and trust policy.
//!
//! Work hashes are expensive; this crate lets a node skip recomputation for
//! blocks a trusted key has vouched for, persists computed hashes across
//! restarts, and decides per block which source to trust.

pub mod config;
pub mod entry;
pub mod error;
pub mod genesis;
pub mod store;
pub mod trust;

pub use config::PowConfig;
pub use entry::SignedHashEntry;
pub use error::CacheError;
pub use genesis::{genesis_entry, trusted_key};
pub use store::{HashCache, CACHE_FILE};
pub use trust::{TrustPolicy, WorkHashSource};
