use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use log::{debug, error};

use crate::{PoolError, Result};

mod queue;
mod worker;

use self::queue::{Task, TaskQueue};
use self::worker::Worker;

/// Policy for tasks still queued when [`WorkerPool::shutdown`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownMode {
    /// Queued tasks are abandoned without being run; only tasks already
    /// in flight are allowed to finish.
    #[default]
    Immediate,
    /// Workers drain the queue before exiting, so every task submitted
    /// before shutdown still runs.
    Graceful,
}

/// State guarded by the pool mutex. The queue and the stop flag are
/// only ever touched while the lock is held; the condvar predicate
/// reads exactly this state, which rules out lost wakeups.
struct PoolState {
    queue: TaskQueue,
    stopping: bool,
}

/// State shared between the pool handle and its worker threads.
struct Shared {
    state: Mutex<PoolState>,
    /// Signaled once per submitted task, broadcast on shutdown.
    available: Condvar,
    mode: ShutdownMode,
}

/// A fixed-size pool of worker threads pulling tasks from a shared
/// FIFO queue.
///
/// Tasks are closures submitted with [`submit`](WorkerPool::submit);
/// each runs exactly once on some worker, in FIFO dequeue order.
/// [`shutdown`](WorkerPool::shutdown) stops and joins every worker;
/// dropping the pool does the same implicitly.
pub struct WorkerPool {
    shared: Arc<Shared>,
    /// Fixed at init; drained on shutdown.
    workers: Vec<Worker>,
    next_seq: AtomicU64,
}

impl WorkerPool {
    /// Creates a pool with the given number of worker threads and the
    /// default [`ShutdownMode::Immediate`] policy.
    ///
    /// A count of zero is clamped to one worker.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ThreadSpawn`] if a worker thread cannot be
    /// created. Workers already started are stopped and joined first,
    /// so a failed init never leaves live threads behind.
    pub fn new(workers: u32) -> Result<Self> {
        Self::with_shutdown_mode(workers, ShutdownMode::default())
    }

    /// Creates a pool with an explicit shutdown policy.
    ///
    /// Errors and clamping behave as in [`new`](WorkerPool::new).
    pub fn with_shutdown_mode(workers: u32, mode: ShutdownMode) -> Result<Self> {
        let count = workers.max(1);

        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                queue: TaskQueue::new(),
                stopping: false,
            }),
            available: Condvar::new(),
            mode,
        });

        let mut pool = WorkerPool {
            shared,
            workers: Vec::with_capacity(count as usize),
            next_seq: AtomicU64::new(0),
        };

        for id in 0..count {
            match worker::spawn_worker(id, Arc::clone(&pool.shared)) {
                Ok(worker) => pool.workers.push(worker),
                Err(e) => {
                    error!("Failed to spawn worker {id}, rolling back pool init");
                    // Stop and join the workers already started before
                    // reporting the failure.
                    let _ = pool.shutdown();
                    return Err(PoolError::ThreadSpawn(e));
                }
            }
        }

        Ok(pool)
    }

    /// Creates a pool with one worker per available CPU.
    pub fn with_default_size() -> Result<Self> {
        Self::new(num_cpus::get() as u32)
    }

    /// Number of live worker threads (zero after shutdown).
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Submits a task for execution by some worker.
    ///
    /// Returns only after the task is durably enqueued; exactly one
    /// idle worker is woken to pick it up. The closure owns its payload
    /// and is consumed by the executing worker.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Shutdown`] if shutdown has already begun.
    pub fn submit<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.state.lock().expect("pool state lock poisoned");
        if state.stopping {
            return Err(PoolError::Shutdown);
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        state.queue.push(Task::new(seq, Box::new(job)));
        // One new task needs exactly one waiting worker.
        self.shared.available.notify_one();
        Ok(())
    }

    /// Stops the pool and joins every worker thread.
    ///
    /// Sets the stop flag under the lock, broadcasts to wake all idle
    /// workers, then blocks until each worker thread has exited. Tasks
    /// already in flight finish; what happens to still-queued tasks
    /// depends on the pool's [`ShutdownMode`]. Returns the number of
    /// tasks abandoned without being run (always zero in graceful
    /// mode). Calling `shutdown` again is a no-op returning `Ok(0)`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::WorkerJoin`] if a worker thread panicked
    /// outside a task and could not be joined cleanly. All remaining
    /// workers are still joined before the error is returned.
    pub fn shutdown(&mut self) -> Result<usize> {
        {
            let mut state = self.shared.state.lock().expect("pool state lock poisoned");
            if state.stopping && self.workers.is_empty() {
                return Ok(0);
            }
            // The stop flag must be written under the same lock the
            // workers wait with, or a worker could miss the wakeup.
            state.stopping = true;
            self.shared.available.notify_all();
        }

        let mut join_failure = None;
        for worker in self.workers.drain(..) {
            let id = worker.id;
            if worker.handle.join().is_err() {
                error!("Worker {id} panicked outside a task");
                join_failure.get_or_insert(id);
            }
        }

        // All workers have exited; whatever is still queued was
        // abandoned by the immediate policy.
        let abandoned = {
            let mut state = self.shared.state.lock().expect("pool state lock poisoned");
            state.queue.abandon()
        };
        if abandoned > 0 {
            debug!("Shutdown abandoned {abandoned} queued tasks");
        }

        match join_failure {
            Some(id) => Err(PoolError::WorkerJoin { id }),
            None => Ok(abandoned),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // A dropped pool must not leak threads.
        if let Err(e) = self.shutdown() {
            error!("Error while shutting down dropped pool: {e}");
        }
    }
}
