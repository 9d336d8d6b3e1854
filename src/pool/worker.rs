use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error};

use super::queue::Task;
use super::{Shared, ShutdownMode};

/// Handle to a single worker thread.
pub(crate) struct Worker {
    pub(crate) id: u32,
    pub(crate) handle: JoinHandle<()>,
}

/// Spawns one worker thread bound to the pool's shared state.
pub(crate) fn spawn_worker(id: u32, shared: Arc<Shared>) -> io::Result<Worker> {
    let handle = thread::Builder::new()
        .name(format!("pool-worker-{id}"))
        .spawn(move || run(id, &shared))?;
    Ok(Worker { id, handle })
}

/// The worker loop: wait for a task or a stop signal, dequeue under the
/// lock, release the lock, execute, repeat until stopped.
fn run(id: u32, shared: &Shared) {
    loop {
        let task = {
            let mut state = shared.state.lock().expect("pool state lock poisoned");
            loop {
                // Under the immediate policy a stop request wins even if
                // tasks are still queued; under graceful the queue is
                // drained first.
                if state.stopping
                    && (shared.mode == ShutdownMode::Immediate || state.queue.is_empty())
                {
                    debug!("Worker {id}: stop requested, exiting");
                    return;
                }
                if let Some(task) = state.queue.pop() {
                    break task;
                }
                // Queue empty and not stopping: suspend on the condvar,
                // which releases the lock while waiting.
                state = shared
                    .available
                    .wait(state)
                    .expect("pool state lock poisoned");
            }
        };

        let Task { seq, job } = task;
        debug!("Worker {id} executing task {seq}");
        // Catch panics so one faulting job cannot take the worker down
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!("Worker {id}: task {seq} panicked, continuing");
        }
    }
}
