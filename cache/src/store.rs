//! Persistent cache of computed and signed work hashes.
//!
//! Two independent maps keyed by block id: plain work hashes recorded after a
//! computation, and signature-backed entries that let a node skip the
//! computation entirely. Both are persisted together as one bincode blob,
//! written wholesale — there is no incremental on-disk format.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use boulder_types::{BlockId, PrivateKey, PublicKey, Signature, WorkHash};

use crate::{CacheError, SignedHashEntry};

/// On-disk file name inside the configured data folder.
pub const CACHE_FILE: &str = "boulderhash.dat";

#[derive(Default, Serialize, Deserialize)]
struct CacheMaps {
    work: HashMap<BlockId, WorkHash>,
    signed: HashMap<BlockId, SignedHashEntry>,
}

/// Work-hash cache with a single non-reentrant lock scoped to each call.
///
/// Entries are never deleted during normal operation; the cache only grows
/// until it is flushed wholesale at shutdown.
pub struct HashCache {
    trusted_key: PublicKey,
    inner: Mutex<CacheMaps>,
}

impl HashCache {
    /// Create an empty cache trusting the given hash-signing public key.
    pub fn new(trusted_key: PublicKey) -> Self {
        Self {
            trusted_key,
            inner: Mutex::new(CacheMaps::default()),
        }
    }

    /// Create a cache trusting the compiled-in network key and load it from
    /// `folder`, seeding from the compiled-in genesis entry if configured.
    pub fn init(folder: &Path) -> Self {
        let cache = Self::new(crate::genesis::trusted_key());
        cache.load(folder, crate::genesis::genesis_entry().as_ref());
        cache
    }

    pub fn trusted_key(&self) -> &PublicKey {
        &self.trusted_key
    }

    fn maps(&self) -> std::sync::MutexGuard<'_, CacheMaps> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a previously computed work hash.
    pub fn get(&self, block_id: &BlockId) -> Option<WorkHash> {
        self.maps().work.get(block_id).copied()
    }

    /// Record a computed work hash (unconditional).
    pub fn add(&self, block_id: BlockId, work_hash: WorkHash) {
        self.maps().work.insert(block_id, work_hash);
    }

    /// Look up a verified signed entry.
    pub fn get_signed(&self, block_id: &BlockId) -> Option<SignedHashEntry> {
        self.maps().signed.get(block_id).cloned()
    }

    /// Insert a signed entry after verifying its signature.
    ///
    /// A bad signature is a soft failure: the entry is rejected and the cache
    /// is left untouched.
    pub fn add_signed(&self, entry: SignedHashEntry) -> Result<(), CacheError> {
        if !entry.verify(&self.trusted_key) {
            tracing::warn!(block_id = %entry.block_id, "rejected signed hash entry");
            return Err(CacheError::BadSignature);
        }
        self.maps().signed.insert(entry.block_id, entry);
        Ok(())
    }

    /// Mint a signed entry for a block and insert it through the verified
    /// path, returning the signature.
    ///
    /// Only succeeds when `key` matches the trusted public key — the entry is
    /// verified exactly like one received from the network.
    pub fn create_signed(
        &self,
        block_id: BlockId,
        work_hash: WorkHash,
        key: &PrivateKey,
    ) -> Result<Signature, CacheError> {
        let entry = SignedHashEntry::create(block_id, work_hash, key);
        let signature = entry.signature.clone();
        self.add_signed(entry)?;
        Ok(signature)
    }

    /// Number of plain work-hash entries.
    pub fn work_len(&self) -> usize {
        self.maps().work.len()
    }

    /// Number of signed entries.
    pub fn signed_len(&self) -> usize {
        self.maps().signed.len()
    }

    pub fn is_empty(&self) -> bool {
        let maps = self.maps();
        maps.work.is_empty() && maps.signed.is_empty()
    }

    /// Load both maps from the cache file in `folder`.
    ///
    /// A missing or corrupt file is a soft failure: the cache falls back to
    /// the genesis entry when one is configured, or stays empty. Signed
    /// entries that no longer verify are dropped.
    pub fn load(&self, folder: &Path, genesis: Option<&SignedHashEntry>) {
        let path = folder.join(CACHE_FILE);
        let maps = match std::fs::read(&path) {
            Ok(bytes) => match bincode::deserialize::<CacheMaps>(&bytes) {
                Ok(maps) => Some(maps),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "corrupt hash cache file");
                    None
                }
            },
            Err(e) => {
                tracing::info!(path = %path.display(), error = %e, "no hash cache file");
                None
            }
        };

        match maps {
            Some(mut loaded) => {
                let before = loaded.signed.len();
                loaded
                    .signed
                    .retain(|_, entry| entry.verify(&self.trusted_key));
                let dropped = before - loaded.signed.len();
                if dropped > 0 {
                    tracing::warn!(dropped, "dropped signed entries with invalid signatures");
                }
                tracing::info!(
                    work = loaded.work.len(),
                    signed = loaded.signed.len(),
                    "hash cache loaded"
                );
                *self.maps() = loaded;
            }
            None => {
                *self.maps() = CacheMaps::default();
                if let Some(entry) = genesis {
                    match self.add_signed(entry.clone()) {
                        Ok(()) => tracing::info!("hash cache seeded from genesis entry"),
                        Err(_) => {
                            tracing::warn!("compiled-in genesis entry failed verification")
                        }
                    }
                }
            }
        }
    }

    /// Serialize both maps as one blob into `folder`, creating it if needed.
    pub fn store(&self, folder: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(folder)?;
        let bytes = {
            let maps = self.maps();
            bincode::serialize(&*maps).map_err(|e| CacheError::Serialization(e.to_string()))?
        };
        std::fs::write(folder.join(CACHE_FILE), bytes)?;
        Ok(())
    }
}
