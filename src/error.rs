use std::io;
use thiserror::Error;

/// Error type for worker pool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The underlying OS thread for a worker could not be created.
    #[error("Failed to spawn worker thread: {0}")]
    ThreadSpawn(#[from] io::Error),

    /// The pool has begun shutting down and accepts no further tasks.
    #[error("Pool is shut down")]
    Shutdown,

    /// A worker thread could not be joined during shutdown.
    ///
    /// Submitted jobs are isolated from the worker loop, so this only
    /// happens if the worker thread itself panicked. The condition is
    /// surfaced to the caller rather than swallowed.
    #[error("Worker {id} could not be joined")]
    WorkerJoin {
        /// Identifier of the worker whose thread join failed.
        id: u32,
    },
}

/// Result type alias for worker pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
