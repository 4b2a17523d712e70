//! Signature-backed work-hash entries.

use serde::{Deserialize, Serialize};

use boulder_crypto::{blake2b_256_multi, sign_message, verify_signature};
use boulder_types::{BlockId, PrivateKey, PublicKey, Signature, WorkHash};

/// A work hash vouched for by the trusted hash-signing key.
///
/// Immutable once validated and inserted into the cache; the signature covers
/// a prefix hash of `block_id ‖ work_hash`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedHashEntry {
    pub block_id: BlockId,
    pub work_hash: WorkHash,
    pub signature: Signature,
}

impl SignedHashEntry {
    /// The message the signature is computed over.
    pub fn signing_message(block_id: &BlockId, work_hash: &WorkHash) -> [u8; 32] {
        blake2b_256_multi(&[block_id.as_bytes(), work_hash.as_bytes()])
    }

    /// Mint a new entry with the given signing key.
    pub fn create(block_id: BlockId, work_hash: WorkHash, key: &PrivateKey) -> Self {
        let message = Self::signing_message(&block_id, &work_hash);
        let signature = sign_message(&message, key);
        Self {
            block_id,
            work_hash,
            signature,
        }
    }

    /// Verify this entry's signature against the trusted public key.
    pub fn verify(&self, trusted_key: &PublicKey) -> bool {
        let message = Self::signing_message(&self.block_id, &self.work_hash);
        verify_signature(&message, &self.signature, trusted_key)
    }
}
