//! Tunable parameters of the BoulderHash algorithm and difficulty estimator.

use serde::{Deserialize, Serialize};

/// Scratchpad size profile, fixed for the lifetime of a process once selected.
///
/// `Small` exists for tests and development; `Regular` is the production
/// profile. State counts and per-state word counts are consensus constants
/// and must never change under a given profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeProfile {
    /// 2 states of 1,024 words (16 KiB total) — tests only.
    Small,
    /// 65 states of 26,738,688 words — production.
    Regular,
}

impl SizeProfile {
    /// Number of independent scratchpad states.
    pub fn states(&self) -> usize {
        match self {
            SizeProfile::Small => 2,
            SizeProfile::Regular => 65,
        }
    }

    /// Number of 64-bit words in each state.
    pub fn state_words(&self) -> usize {
        match self {
            SizeProfile::Small => 1_024,
            SizeProfile::Regular => 26_738_688,
        }
    }

    /// Total words across all states.
    pub fn total_words(&self) -> usize {
        self.states() * self.state_words()
    }
}

/// Parameters of the windowed trimmed-mean difficulty estimator.
///
/// The defaults are the network constants; tests shrink the window to
/// exercise edge cases without building 72-sample fixtures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Sliding window length in samples.
    pub window: usize,

    /// Number of extreme time-deltas dropped from each end of the sorted list.
    pub cut: usize,

    /// Optional lag restricting how recent the window may reach.
    pub lag: usize,

    /// Height at which the version-2 algorithm activates. At or past this
    /// height non-positive time-deltas are clamped to zero; below it they are
    /// preserved unchanged for chain compatibility.
    pub upgrade_height: u64,

    /// Length of the reduced-difficulty window immediately after
    /// `upgrade_height`, easing the network through the algorithm switch.
    pub easy_window: u64,
}

impl DifficultyParams {
    /// Network defaults.
    pub fn network_defaults() -> Self {
        Self {
            window: 72,
            cut: 6,
            lag: 0,
            upgrade_height: 100_000,
            easy_window: 720,
        }
    }

    /// Last height inside the easy window.
    pub fn easy_window_end(&self) -> u64 {
        self.upgrade_height + self.easy_window
    }
}

impl Default for DifficultyParams {
    fn default() -> Self {
        Self::network_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_profile_dimensions() {
        let p = SizeProfile::Small;
        assert_eq!(p.states(), 2);
        assert_eq!(p.state_words(), 1_024);
        assert_eq!(p.total_words(), 2_048);
    }

    #[test]
    fn regular_profile_dimensions() {
        let p = SizeProfile::Regular;
        assert_eq!(p.states(), 65);
        assert_eq!(p.state_words(), 26_738_688);
    }

    #[test]
    fn default_difficulty_params() {
        let p = DifficultyParams::default();
        assert_eq!(p.window, 72);
        assert_eq!(p.cut, 6);
        assert_eq!(p.lag, 0);
        assert_eq!(p.easy_window_end(), p.upgrade_height + p.easy_window);
    }
}
