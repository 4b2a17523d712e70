//! Compiled-in trust anchors: the hash-signing public key and the optional
//! genesis signed entry used to seed a fresh cache.

use boulder_types::{BlockId, PublicKey, Signature, WorkHash};

use crate::SignedHashEntry;

/// The network's hash-signing public key. Entries in the signed cache must
/// verify against this key; nodes holding the matching private key may mint
/// new entries.
pub const TRUSTED_HASH_KEY: [u8; 32] = [
    0x6f, 0x1a, 0x82, 0xc5, 0x0b, 0x9e, 0x44, 0xd7, 0x23, 0xf8, 0x5c, 0x91, 0x3a, 0xe6, 0x70,
    0x0d, 0xb4, 0x58, 0xc2, 0x17, 0x9d, 0x36, 0xea, 0x41, 0x88, 0x5f, 0xd0, 0x2b, 0x74, 0xc9,
    0x1e, 0x63,
];

/// Genesis seed constants, hex-encoded. Empty strings mean no genesis entry
/// is configured and a fresh cache starts empty.
pub const GENESIS_BLOCK_ID_HEX: &str = "";
pub const GENESIS_WORK_HASH_HEX: &str = "";
pub const GENESIS_SIGNATURE_HEX: &str = "";

/// The compiled-in trusted public key.
pub fn trusted_key() -> PublicKey {
    PublicKey(TRUSTED_HASH_KEY)
}

/// The compiled-in genesis entry, if the constants are configured.
///
/// The entry is not verified here; [`crate::HashCache::load`] inserts it
/// through the verified path and drops it with a warning if it fails.
pub fn genesis_entry() -> Option<SignedHashEntry> {
    let block_id = decode_32(GENESIS_BLOCK_ID_HEX)?;
    let work_hash = decode_32(GENESIS_WORK_HASH_HEX)?;
    let signature = decode_64(GENESIS_SIGNATURE_HEX)?;
    Some(SignedHashEntry {
        block_id: BlockId::new(block_id),
        work_hash: WorkHash::new(work_hash),
        signature: Signature(signature),
    })
}

fn decode_32(s: &str) -> Option<[u8; 32]> {
    hex::decode(s).ok()?.try_into().ok()
}

fn decode_64(s: &str) -> Option<[u8; 64]> {
    hex::decode(s).ok()?.try_into().ok()
}
