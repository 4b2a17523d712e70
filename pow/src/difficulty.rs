//! Windowed trimmed-mean difficulty retargeting.
//!
//! The estimator looks at a bounded window of recent block timestamps and
//! cumulative difficulties, drops extreme time-deltas from both ends of the
//! sorted list, and aims the next difficulty at the configured block time.
//! Arithmetic is exact: the candidate is computed with 128-bit multiplication
//! and overflow collapses to zero before clamping, never to a wrong value.

use boulder_types::DifficultyParams;

/// Compute the next target difficulty.
///
/// `timestamps` and `cumulative_difficulties` are parallel sequences ordered
/// by block height; `height` is the height of the block being targeted.
/// Returns at least 1.
pub fn next_difficulty(
    params: &DifficultyParams,
    height: u64,
    timestamps: &[u64],
    cumulative_difficulties: &[u64],
    target_seconds: u64,
) -> u64 {
    debug_assert_eq!(timestamps.len(), cumulative_difficulties.len());

    // Restrict to the most recent `window` samples, minus the lag.
    let end = timestamps.len().saturating_sub(params.lag);
    let start = end.saturating_sub(params.window);
    let timestamps = &timestamps[start..end];
    let cumulative = &cumulative_difficulties[start..end];

    if timestamps.len() < 2 {
        return 1;
    }

    // Deltas are signed and a u64 difference can exceed i64, so the delta
    // arithmetic runs in i128 end to end.
    let mut time_deltas: Vec<(i128, usize)> = Vec::with_capacity(timestamps.len() - 1);
    for k in 1..timestamps.len() {
        let mut dt = timestamps[k] as i128 - timestamps[k - 1] as i128;
        // From the upgrade height on, out-of-order timestamps are clamped.
        // Below it the negative deltas flow through unchanged; old chain
        // segments were retargeted that way and must re-validate identically.
        if height >= params.upgrade_height && dt <= 0 {
            dt = 0;
        }
        time_deltas.push((dt, k - 1));
    }
    let difficulty_deltas: Vec<u64> = (1..cumulative.len())
        .map(|k| cumulative[k].saturating_sub(cumulative[k - 1]))
        .collect();

    time_deltas.sort_unstable();

    let n = time_deltas.len();
    let keep_min = params.window.saturating_sub(2 * params.cut);
    let surviving: &[(i128, usize)] =
        if n > 2 * params.cut && n - 2 * params.cut >= keep_min {
            &time_deltas[params.cut..n - params.cut]
        } else {
            &time_deltas[..]
        };

    let span: i128 = surviving.iter().map(|&(dt, _)| dt).sum();
    let time_span = span.clamp(1, u64::MAX as i128) as u64;
    let total_work: u64 = surviving
        .iter()
        .fold(0u64, |acc, &(_, idx)| acc.saturating_add(difficulty_deltas[idx]));
    let count = surviving.len() as u64;

    // candidate = ceil(total_work * target / time_span), exact in 128 bits.
    // A product overflowing 64 bits, or a rounding addition that wraps,
    // collapses the candidate to zero; the clamp below recovers it.
    let product = total_work as u128 * target_seconds as u128;
    let (high, low) = ((product >> 64) as u64, product as u64);
    let candidate = if high != 0 {
        0
    } else {
        match low.checked_add(time_span - 1) {
            Some(adjusted) => adjusted / time_span,
            None => 0,
        }
    };

    let lower = total_work / 4 / count;
    let upper = ((total_work as u128 * 4) / count as u128).min(u64::MAX as u128) as u64;
    let mut result = candidate.clamp(lower, upper);

    // Soften difficulty through the easy window right after the upgrade.
    if height >= params.upgrade_height && height < params.easy_window_end() {
        let window = params.easy_window as u128;
        let remaining = (params.easy_window_end() - height) as u128;
        result = ((result as u128) * window / (window + 14 * remaining)) as u64;
    }

    result.max(1)
}
