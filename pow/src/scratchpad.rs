//! Scratchpad memory for the BoulderHash engine.
//!
//! The scratchpad is one contiguous buffer of 64-bit words holding
//! `states × state_words` entries; individual states are views into it via
//! explicit index arithmetic. Allocation is all-or-nothing: a node that
//! cannot hold the full scratchpad has no proof-of-work path at all.

use boulder_types::SizeProfile;

use crate::PowError;

/// Working memory for one BoulderHash computation.
///
/// A `Scratchpad` owned privately by a single caller needs no locking.
/// A process-wide shared instance must be wrapped in a mutex by its owner
/// (see [`crate::PowContext`]); the two uses may run concurrently with each
/// other because every computation writes its own pad in full before reading.
pub struct Scratchpad {
    profile: SizeProfile,
    words: Vec<u64>,
}

impl Scratchpad {
    /// Allocate a zeroed scratchpad for the given size profile.
    ///
    /// Fails with [`PowError::ScratchpadAllocation`] if the full buffer cannot
    /// be reserved. There is no partially-allocated or degraded mode.
    pub fn allocate(profile: SizeProfile) -> Result<Self, PowError> {
        let total = profile.total_words();
        let mut words = Vec::new();
        words
            .try_reserve_exact(total)
            .map_err(|_| PowError::ScratchpadAllocation { words: total })?;
        words.resize(total, 0);
        Ok(Self { profile, words })
    }

    pub fn profile(&self) -> SizeProfile {
        self.profile
    }

    /// Number of independent states.
    pub fn states(&self) -> usize {
        self.profile.states()
    }

    /// Number of 64-bit words per state.
    pub fn state_words(&self) -> usize {
        self.profile.state_words()
    }

    /// Read-only view of state `i`.
    pub fn state(&self, i: usize) -> &[u64] {
        let w = self.state_words();
        &self.words[i * w..(i + 1) * w]
    }

    /// Mutable view of state `i`.
    pub fn state_mut(&mut self, i: usize) -> &mut [u64] {
        let w = self.state_words();
        &mut self.words[i * w..(i + 1) * w]
    }

    /// The whole buffer, for chunked parallel filling.
    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_small_profile() {
        let pad = Scratchpad::allocate(SizeProfile::Small).unwrap();
        assert_eq!(pad.states(), 2);
        assert_eq!(pad.state_words(), 1_024);
        assert_eq!(pad.state(0).len(), 1_024);
        assert_eq!(pad.state(1).len(), 1_024);
    }

    #[test]
    fn states_are_disjoint() {
        let mut pad = Scratchpad::allocate(SizeProfile::Small).unwrap();
        pad.state_mut(0).fill(1);
        pad.state_mut(1).fill(2);
        assert!(pad.state(0).iter().all(|&w| w == 1));
        assert!(pad.state(1).iter().all(|&w| w == 2));
    }

    #[test]
    fn fresh_pad_is_zeroed() {
        let pad = Scratchpad::allocate(SizeProfile::Small).unwrap();
        assert!(pad.state(0).iter().all(|&w| w == 0));
    }
}
