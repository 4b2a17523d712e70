//! Per-block choice between trusting a signed hash and recomputing.

use boulder_pow::{HashVersion, PowContext, PowError};
use boulder_types::{BlockId, WorkHash};

use crate::{CacheError, HashCache, PowConfig};

/// Source of freshly computed work hashes.
///
/// The trust policy only sees this seam; tests substitute a counting spy to
/// prove the signed fast path never computes.
pub trait WorkHashSource {
    fn work_hash(&self, version: HashVersion, data: &[u8]) -> Result<WorkHash, PowError>;
}

impl WorkHashSource for PowContext {
    fn work_hash(&self, version: HashVersion, data: &[u8]) -> Result<WorkHash, PowError> {
        self.compute_shared(version, data)
    }
}

/// Decides, per block, whether to trust a cached signed hash or recompute.
#[derive(Clone, Debug)]
pub struct TrustPolicy {
    use_signed_hashes: bool,
    use_boulderhash: bool,
    cache_results: bool,
}

impl TrustPolicy {
    pub fn new(use_signed_hashes: bool, use_boulderhash: bool, cache_results: bool) -> Self {
        Self {
            use_signed_hashes,
            use_boulderhash,
            cache_results,
        }
    }

    pub fn from_config(config: &PowConfig) -> Self {
        Self::new(
            !config.disable_signed_hashes,
            config.enable_boulderhash,
            true,
        )
    }

    /// Resolve a block's work hash.
    ///
    /// The signed map is the fast path: a verified entry short-circuits any
    /// computation. Otherwise the hash is computed (consulting the unsigned
    /// cache first) and optionally recorded. With both sources disabled the
    /// block cannot be verified at all.
    pub fn resolve(
        &self,
        cache: &HashCache,
        source: &dyn WorkHashSource,
        block_id: &BlockId,
        block_data: &[u8],
        version: HashVersion,
    ) -> Result<WorkHash, CacheError> {
        if self.use_signed_hashes {
            if let Some(entry) = cache.get_signed(block_id) {
                return Ok(entry.work_hash);
            }
        }

        if self.use_boulderhash {
            if let Some(work_hash) = cache.get(block_id) {
                return Ok(work_hash);
            }
            let work_hash = source.work_hash(version, block_data)?;
            if self.cache_results {
                cache.add(*block_id, work_hash);
            }
            return Ok(work_hash);
        }

        Err(CacheError::NoTrustedSource)
    }
}
