//! Process-level proof-of-work context.
//!
//! Owns the shared scratchpad and the optional fill pool, constructed once at
//! startup and passed by handle into every computation. Callers that want
//! full concurrency allocate private pads per call instead of contending on
//! the shared one.

use std::sync::{Mutex, PoisonError};

use boulder_types::{SizeProfile, WorkHash};

use crate::engine::{compute, HashVersion};
use crate::pool::FillPool;
use crate::{PowError, Scratchpad};

/// Handle bundling the shared scratchpad and worker pool.
pub struct PowContext {
    profile: SizeProfile,
    pool: Option<FillPool>,
    shared: Mutex<Scratchpad>,
}

impl PowContext {
    /// Build a context with a worker pool of `worker_threads` threads
    /// (0 selects the hardware concurrency).
    ///
    /// Allocation of the shared scratchpad is all-or-nothing; failure here is
    /// fatal to the proof-of-work path.
    pub fn new(
        profile: SizeProfile,
        worker_threads: usize,
        states_per_thread: usize,
    ) -> Result<Self, PowError> {
        let shared = Scratchpad::allocate(profile)?;
        let pool = FillPool::new(worker_threads, states_per_thread)?;
        Ok(Self {
            profile,
            pool: Some(pool),
            shared: Mutex::new(shared),
        })
    }

    /// Build a context without a worker pool; every fill runs serially.
    pub fn serial(profile: SizeProfile) -> Result<Self, PowError> {
        let shared = Scratchpad::allocate(profile)?;
        Ok(Self {
            profile,
            pool: None,
            shared: Mutex::new(shared),
        })
    }

    pub fn profile(&self) -> SizeProfile {
        self.profile
    }

    pub fn pool(&self) -> Option<&FillPool> {
        self.pool.as_ref()
    }

    /// Compute a work hash on the shared scratchpad.
    ///
    /// Concurrent callers are serialized on the pad's lock; the lock is held
    /// for the whole computation and for nothing else.
    pub fn compute_shared(&self, version: HashVersion, data: &[u8]) -> Result<WorkHash, PowError> {
        let mut pad = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        compute(version, data, &mut pad, self.pool.as_ref())
    }

    /// Compute a work hash on a freshly allocated private scratchpad.
    ///
    /// Runs fully concurrently with other private computations and with the
    /// shared pad, at the cost of a per-call allocation.
    pub fn compute_private(&self, version: HashVersion, data: &[u8]) -> Result<WorkHash, PowError> {
        let mut pad = Scratchpad::allocate(self.profile)?;
        compute(version, data, &mut pad, self.pool.as_ref())
    }
}
