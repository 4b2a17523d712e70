//! The BoulderHash algorithm: seeding, state filling, and result mixing.
//!
//! Two versions exist on the network. Version 1 fills each state with a plain
//! linear congruential recurrence; version 2 adds a data-dependent lookback
//! XOR during the fill and runs roughly 40× more mixing rounds, making
//! precomputation and partial-memory shortcuts much more expensive.

use boulder_crypto::blake2b_256;
use boulder_types::WorkHash;

use crate::pool::{fill_all_states, FillPool};
use crate::{PowError, Scratchpad};

/// BoulderHash algorithm version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashVersion {
    V1,
    V2,
}

impl HashVersion {
    /// Number of mixing rounds in the result phase.
    pub fn rounds(&self) -> u64 {
        match self {
            HashVersion::V1 => 1_064_960,
            HashVersion::V2 => 42_598_400,
        }
    }
}

/// LCG multiplier shared by the fill and mix recurrences (odd, full period).
const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
/// LCG increment shared by the fill and mix recurrences.
const INCREMENT: u64 = 1_442_695_040_888_963_407;

#[inline]
fn lcg(v: u64) -> u64 {
    v.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)
}

/// Compute the BoulderHash work hash of `data`.
///
/// Seeds every state from a sequential hash chain over `data`, fills all
/// states (in parallel when a pool is supplied, serially otherwise — the
/// result is identical either way because states are independent), then mixes
/// the filled memory into the final digest.
pub fn compute(
    version: HashVersion,
    data: &[u8],
    pad: &mut Scratchpad,
    pool: Option<&FillPool>,
) -> Result<WorkHash, PowError> {
    let (result, extra) = init_states(data, pad);
    fill_all_states(version, pad, pool)?;
    Ok(mix(version, result, extra, pad))
}

/// Seed the scratchpad and derive the initial mixing values.
///
/// Seeding is inherently sequential: each state's seed hash depends on every
/// previous one, so an attacker cannot seed states independently.
fn init_states(data: &[u8], pad: &mut Scratchpad) -> ([u64; 4], u64) {
    let mut h = blake2b_256(data);
    for i in 0..pad.states() {
        h = blake2b_256(&h);
        pad.state_mut(i)[0] = u64::from_le_bytes(h[0..8].try_into().unwrap());
    }

    h = blake2b_256(&h);
    let mut result = [0u64; 4];
    for (i, word) in result.iter_mut().enumerate() {
        *word = u64::from_le_bytes(h[i * 8..(i + 1) * 8].try_into().unwrap());
    }

    h = blake2b_256(&h);
    let extra = u64::from_le_bytes(h[0..8].try_into().unwrap());
    (result, extra)
}

/// Fill one state from its seed word.
pub(crate) fn fill_state(version: HashVersion, state: &mut [u64]) {
    match version {
        HashVersion::V1 => {
            for j in 1..state.len() {
                state[j] = lcg(state[j - 1]);
            }
        }
        HashVersion::V2 => {
            state[1] = lcg(state[0]);
            for j in 2..state.len() {
                let v = lcg(state[j - 1]);
                state[j] = v ^ state[lookback(v, j)];
            }
        }
    }
}

/// Version-2 lookback index: a data-dependent reference into the last quarter
/// of the already-written prefix. Always strictly less than `j`, so the fill
/// stays single-pass with no forward references.
pub fn lookback(v: u64, j: usize) -> usize {
    if j < 5 {
        return 0;
    }
    let quarter = (j - 1) / 4;
    ((v >> 32) as usize % quarter) + (j - 1) * 3 / 4
}

/// Mix the filled states into the final digest.
fn mix(version: HashVersion, mut result: [u64; 4], mut extra: u64, pad: &Scratchpad) -> WorkHash {
    let num_states = pad.states() as u64;
    let state_words = pad.state_words() as u64;

    let mut cursor = 0usize;
    for _ in 0..version.rounds() {
        let v = result[cursor];
        let state_idx = ((v >> 32) % num_states) as usize;
        let word_idx = (v % state_words) as usize;
        result[cursor] = extra ^ pad.state(state_idx)[word_idx];
        extra = lcg(extra);
        cursor = (cursor + 1) & 3;
    }

    let mut bytes = [0u8; 32];
    for (i, word) in result.iter().enumerate() {
        bytes[i * 8..(i + 1) * 8].copy_from_slice(&word.to_le_bytes());
    }
    WorkHash::new(blake2b_256(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boulder_types::SizeProfile;

    fn small_pad() -> Scratchpad {
        Scratchpad::allocate(SizeProfile::Small).unwrap()
    }

    #[test]
    fn compute_is_deterministic() {
        let mut pad = small_pad();
        let h1 = compute(HashVersion::V1, b"block header bytes", &mut pad, None).unwrap();
        let h2 = compute(HashVersion::V1, b"block header bytes", &mut pad, None).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn versions_produce_different_digests() {
        let mut pad = small_pad();
        let h1 = compute(HashVersion::V1, b"same input", &mut pad, None).unwrap();
        let h2 = compute(HashVersion::V2, b"same input", &mut pad, None).unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn different_inputs_differ() {
        let mut pad = small_pad();
        let h1 = compute(HashVersion::V1, b"input a", &mut pad, None).unwrap();
        let h2 = compute(HashVersion::V1, b"input b", &mut pad, None).unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn parallel_fill_matches_serial() {
        let pool = FillPool::new(2, 1).unwrap();
        let mut pad_serial = small_pad();
        let mut pad_parallel = small_pad();
        let serial = compute(HashVersion::V1, b"fill order test", &mut pad_serial, None).unwrap();
        let parallel = compute(
            HashVersion::V1,
            b"fill order test",
            &mut pad_parallel,
            Some(&pool),
        )
        .unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn seeds_are_chained() {
        // The second state's seed must depend on the first: flipping the input
        // changes every state's word zero.
        let mut pad_a = small_pad();
        let mut pad_b = small_pad();
        init_states(b"input a", &mut pad_a);
        init_states(b"input b", &mut pad_b);
        assert_ne!(pad_a.state(0)[0], pad_b.state(0)[0]);
        assert_ne!(pad_a.state(1)[0], pad_b.state(1)[0]);
    }

    #[test]
    fn fill_v1_is_the_plain_recurrence() {
        let mut state = vec![0u64; 16];
        state[0] = 0x1234_5678_9abc_def0;
        fill_state(HashVersion::V1, &mut state);
        for j in 1..state.len() {
            assert_eq!(state[j], lcg(state[j - 1]));
        }
    }

    #[test]
    fn fill_v2_diverges_from_v1() {
        let mut v1 = vec![0u64; 64];
        let mut v2 = vec![0u64; 64];
        v1[0] = 42;
        v2[0] = 42;
        fill_state(HashVersion::V1, &mut v1);
        fill_state(HashVersion::V2, &mut v2);
        assert_ne!(v1, v2);
    }

    #[test]
    fn lookback_never_references_forward() {
        for j in 5..2_000usize {
            for v in [0u64, u64::MAX, 0xdead_beef_0000_0000] {
                assert!(lookback(v, j) < j, "lookback({v}, {j}) referenced forward");
            }
        }
    }

    #[test]
    fn lookback_below_five_is_zero() {
        for j in 0..5 {
            assert_eq!(lookback(u64::MAX, j), 0);
        }
    }
}
