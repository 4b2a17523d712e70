//! Difficulty target comparison over exact wide-integer arithmetic.

use boulder_types::WorkHash;

/// Check whether `hash` satisfies `difficulty`.
///
/// The hash is read as four little-endian 64-bit words and the check is that
/// the full 320-bit product `hash × difficulty` has no bits set at or above
/// bit 256. A random hash almost always fails on its top word alone, so that
/// is tested first and the full carry chain only runs when it passes.
pub fn check_hash(hash: &WorkHash, difficulty: u64) -> bool {
    let bytes = hash.as_bytes();
    let mut w = [0u64; 4];
    for (i, word) in w.iter_mut().enumerate() {
        *word = u64::from_le_bytes(bytes[i * 8..(i + 1) * 8].try_into().unwrap());
    }
    let d = difficulty as u128;

    // Fast reject: the top word's product alone spills past bit 255.
    let t3 = w[3] as u128 * d;
    if (t3 >> 64) as u64 != 0 {
        return false;
    }

    let t0 = w[0] as u128 * d;
    let t1 = w[1] as u128 * d;
    let t2 = w[2] as u128 * d;

    // Propagate carries through product words 1..3. The product fits in
    // 256 bits exactly when the final word addition does not carry.
    let (_, carry1) = ((t0 >> 64) as u64).overflowing_add(t1 as u64);
    let (word2, carry2a) = ((t1 >> 64) as u64).overflowing_add(t2 as u64);
    let (_, carry2b) = word2.overflowing_add(carry1 as u64);
    let carry2 = carry2a || carry2b;
    let (word3, carry3a) = ((t2 >> 64) as u64).overflowing_add(t3 as u64);
    let (_, carry3b) = word3.overflowing_add(carry2 as u64);

    !(carry3a || carry3b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_from_words(w: [u64; 4]) -> WorkHash {
        let mut bytes = [0u8; 32];
        for (i, word) in w.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&word.to_le_bytes());
        }
        WorkHash::new(bytes)
    }

    #[test]
    fn zero_hash_passes_any_difficulty() {
        assert!(check_hash(&WorkHash::ZERO, 1));
        assert!(check_hash(&WorkHash::ZERO, u64::MAX));
    }

    #[test]
    fn any_hash_passes_difficulty_one() {
        assert!(check_hash(&hash_from_words([u64::MAX; 4]), 1));
    }

    #[test]
    fn max_hash_fails_difficulty_two() {
        assert!(!check_hash(&hash_from_words([u64::MAX; 4]), 2));
    }

    #[test]
    fn fast_reject_on_top_word() {
        // hash = 2^255: difficulty 2 lands exactly on 2^256 and must fail;
        // only difficulty 1 keeps the product under the bound.
        let h = hash_from_words([0, 0, 0, 1 << 63]);
        assert!(!check_hash(&h, 4));
        assert!(!check_hash(&h, 2));
        assert!(check_hash(&h, 1));
        // hash = 2^254: difficulty 2 gives 2^255, which fits.
        let h2 = hash_from_words([0, 0, 0, 1 << 62]);
        assert!(check_hash(&h2, 2));
    }

    #[test]
    fn carry_chain_detects_overflow_from_low_words() {
        // w3 * 5 = 2^64 - 1, so the fast check passes either way; only the
        // carries from the lower words push the second product past 256 bits.
        let w3 = u64::MAX / 5;
        let passes = hash_from_words([0, 0, 0, w3]);
        assert!(check_hash(&passes, 5));
        let overflows = hash_from_words([u64::MAX, u64::MAX, u64::MAX, w3]);
        assert!(!check_hash(&overflows, 5));
    }

    #[test]
    fn boundary_product_exactly_fits() {
        // hash = 2^254 as words, difficulty 4: product = 2^256, overflows.
        let h = hash_from_words([0, 0, 0, 1 << 62]);
        assert!(!check_hash(&h, 4));
        // difficulty 3: product = 3 * 2^254 < 2^256, fits.
        assert!(check_hash(&h, 3));
    }

    #[test]
    fn monotonic_in_difficulty() {
        let h = hash_from_words([0xdead_beef, 0, 1, 0x0000_0000_ffff_ffff]);
        let mut failed = false;
        for d in [1u64, 1000, 1 << 32, 1 << 33, u64::MAX] {
            let pass = check_hash(&h, d);
            // Once it fails it must keep failing as difficulty rises.
            if failed {
                assert!(!pass, "check_hash not monotonic at difficulty {d}");
            }
            failed = !pass;
        }
    }
}
