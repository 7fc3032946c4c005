use std::num::NonZeroUsize;
use std::sync::{Arc, Condvar, Mutex, PoisonError};

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WorkerPoolError {
    #[error("failed to start worker pool: {0}")]
    Build(#[from] ThreadPoolBuildError),
}

/// Count of worker threads that have not exited yet.
#[derive(Debug)]
struct LiveWorkers {
    count: Mutex<usize>,
    all_exited: Condvar,
}

impl LiveWorkers {
    fn worker_exited(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count = count.saturating_sub(1);

        if *count == 0 {
            self.all_exited.notify_all();
        }
    }

    fn wait_for_all(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);

        while *count > 0 {
            count = self
                .all_exited
                .wait(count)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// Fixed-size rayon pool that joins its threads when shut down.
///
/// A bare [`ThreadPool`] only signals its threads to stop when dropped. This
/// wrapper waits until every one of them has actually exited, either in
/// [`WorkerPool::shutdown`] or on drop. Never drop it from one of its own
/// worker threads.
#[derive(Debug)]
pub struct WorkerPool {
    pool: Option<ThreadPool>,
    live: Arc<LiveWorkers>,
    worker_count: NonZeroUsize,
}

impl WorkerPool {
    pub fn new(worker_count: NonZeroUsize) -> Result<Self, WorkerPoolError> {
        let live = Arc::new(LiveWorkers {
            count: Mutex::new(worker_count.get()),
            all_exited: Condvar::new(),
        });
        let on_exit = Arc::clone(&live);

        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count.get())
            .thread_name(|index| format!("fractal-worker-{index}"))
            .exit_handler(move |_| on_exit.worker_exited())
            .build()?;

        debug!(workers = worker_count.get(), "worker pool started");

        Ok(Self {
            pool: Some(pool),
            live,
            worker_count,
        })
    }

    #[must_use]
    pub fn worker_count(&self) -> NonZeroUsize {
        self.worker_count
    }

    /// Runs `op` inside the pool; parallel iterators used by `op` are
    /// scheduled on this pool's threads.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            // only reachable during drop
            None => op(),
        }
    }

    /// Stops the pool and blocks until every worker thread has exited.
    pub fn shutdown(mut self) {
        self.join_workers();
    }

    fn join_workers(&mut self) {
        if let Some(pool) = self.pool.take() {
            drop(pool);
            self.live.wait_for_all();
            debug!(workers = self.worker_count.get(), "worker pool stopped");
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.join_workers();
    }
}
