//! Cryptographic primitives for the Boulder core.
//!
//! The digest function used throughout the proof-of-work engine is Blake2b
//! truncated to 256 bits; it is treated as an opaque fixed-width primitive by
//! everything above this crate. Ed25519 backs the signed hash cache.

pub mod hash;
pub mod keys;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
