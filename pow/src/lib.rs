//! BoulderHash proof-of-work core.
//!
//! The memory-hard BoulderHash function (two network versions), its
//! thread-parallel computation path, the windowed trimmed-mean difficulty
//! estimator, and the wide-integer target check. Everything is driven through
//! library calls; the surrounding node wires these into block validation.

pub mod context;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod pool;
pub mod scratchpad;
pub mod target;

pub use context::PowContext;
pub use difficulty::next_difficulty;
pub use engine::{compute, lookback, HashVersion};
pub use error::PowError;
pub use pool::{fill_all_states, FillPool};
pub use scratchpad::Scratchpad;
pub use target::check_hash;
