//! Fundamental types for the Boulder proof-of-work core.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: block identifiers, work hashes, key material, and the tunable
//! parameters of the BoulderHash algorithm and difficulty estimator.

pub mod hash;
pub mod keys;
pub mod params;

pub use hash::{BlockId, WorkHash};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use params::{DifficultyParams, SizeProfile};
