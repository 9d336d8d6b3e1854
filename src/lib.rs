#![deny(missing_docs)]

//! A fixed-size worker thread pool.
//!
//! A bounded set of long-lived worker threads pulls tasks from a shared
//! FIFO queue, decoupling task submission from execution. Submitters
//! and workers coordinate through a single mutex and condition
//! variable; shutdown stops and joins every worker before returning.
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use workpool::{ShutdownMode, WorkerPool};
//!
//! # fn main() -> workpool::Result<()> {
//! let mut pool = WorkerPool::with_shutdown_mode(4, ShutdownMode::Graceful)?;
//! let counter = Arc::new(AtomicUsize::new(0));
//!
//! for _ in 0..8 {
//!     let counter = Arc::clone(&counter);
//!     pool.submit(move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     })?;
//! }
//!
//! let abandoned = pool.shutdown()?;
//! assert_eq!(abandoned, 0);
//! assert_eq!(counter.load(Ordering::SeqCst), 8);
//! # Ok(())
//! # }
//! ```

mod error;
mod pool;

pub use error::{PoolError, Result};
pub use pool::{ShutdownMode, WorkerPool};
