use std::collections::VecDeque;
use std::fmt;

/// A boxed unit of work. The closure owns whatever payload it captured;
/// the executing worker consumes it, so it runs at most once.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// One pending unit of work: a job plus a submission sequence number
/// used for logging.
pub(crate) struct Task {
    pub(crate) seq: u64,
    pub(crate) job: Job,
}

impl Task {
    pub(crate) fn new(seq: u64, job: Job) -> Self {
        Task { seq, job }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("seq", &self.seq).finish()
    }
}

/// FIFO queue of pending tasks.
///
/// Has no locking of its own: it is only ever accessed through the
/// pool's mutex, so every mutation happens with the lock held.
#[derive(Default)]
pub(crate) struct TaskQueue {
    tasks: VecDeque<Task>,
}

impl TaskQueue {
    pub(crate) fn new() -> Self {
        TaskQueue {
            tasks: VecDeque::new(),
        }
    }

    /// Appends a task at the tail.
    pub(crate) fn push(&mut self, task: Task) {
        self.tasks.push_back(task);
    }

    /// Removes and returns the task at the head, if any. Ownership of
    /// the task moves to the caller, which is responsible for running
    /// or dropping it.
    pub(crate) fn pop(&mut self) -> Option<Task> {
        self.tasks.pop_front()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drops every pending task without running it and returns how many
    /// were abandoned.
    pub(crate) fn abandon(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        count
    }
}
