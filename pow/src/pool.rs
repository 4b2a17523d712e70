//! Parallel state filling over a dedicated worker pool.
//!
//! The pool is an explicit handle owned by the caller's context, not process
//! global state: constructing a [`FillPool`] spawns the workers, dropping it
//! joins them. Filling splits the scratchpad into contiguous chunks of whole
//! states and blocks until every chunk is done; a failed worker aborts the
//! entire computation, never leaving a partial fill behind.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;

use crate::engine::{fill_state, HashVersion};
use crate::{PowError, Scratchpad};

/// Worker pool for parallel scratchpad filling.
pub struct FillPool {
    pool: rayon::ThreadPool,
    states_per_thread: usize,
}

impl FillPool {
    /// Spawn a pool of `threads` workers (0 selects the hardware concurrency)
    /// that fill `states_per_thread` contiguous states per task.
    pub fn new(threads: usize, states_per_thread: usize) -> Result<Self, PowError> {
        let threads = if threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            threads
        };
        let states_per_thread = states_per_thread.max(1);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("boulder-fill-{i}"))
            .build()
            .map_err(|e| PowError::PoolBuild(e.to_string()))?;

        tracing::debug!(threads, states_per_thread, "fill pool started");
        Ok(Self {
            pool,
            states_per_thread,
        })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Number of contiguous states each task fills.
    pub fn states_per_thread(&self) -> usize {
        self.states_per_thread
    }
}

/// Fill every state of the scratchpad.
///
/// With a pool, one task is submitted per chunk of `states_per_thread` states
/// and the call blocks until all tasks finish; the first worker failure aborts
/// the whole fill with [`PowError::WorkerFailed`]. Without a pool the states
/// are filled serially in index order. Both paths produce identical memory
/// because states never read each other during the fill.
pub fn fill_all_states(
    version: HashVersion,
    pad: &mut Scratchpad,
    pool: Option<&FillPool>,
) -> Result<(), PowError> {
    let state_words = pad.state_words();

    let Some(fill_pool) = pool else {
        for i in 0..pad.states() {
            fill_state(version, pad.state_mut(i));
        }
        return Ok(());
    };

    let chunk_words = state_words * fill_pool.states_per_thread;
    let words = pad.words_mut();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        fill_pool.pool.install(|| {
            words.par_chunks_mut(chunk_words).for_each(|chunk| {
                for state in chunk.chunks_mut(state_words) {
                    fill_state(version, state);
                }
            });
        });
    }));

    outcome.map_err(|_| {
        tracing::error!("worker task panicked during parallel state fill");
        PowError::WorkerFailed
    })
}
