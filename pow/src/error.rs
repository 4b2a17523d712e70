use thiserror::Error;

#[derive(Debug, Error)]
pub enum PowError {
    #[error("scratchpad allocation of {words} words failed")]
    ScratchpadAllocation { words: usize },

    #[error("worker task failed during parallel state fill")]
    WorkerFailed,

    #[error("worker pool construction failed: {0}")]
    PoolBuild(String),
}
