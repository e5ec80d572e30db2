//! The bounded task limiter: a `rayon::ThreadPool` sized to bound
//! concurrent scenarios, standing in for the "thread behind a counted
//! semaphore" description (§5's implementation note).

use rayon::{ThreadPool, ThreadPoolBuilder};

/// Bounds how many scenarios may run concurrently.
///
/// Grounded in the teacher's use of `rayon` for bounded data-parallel grid
/// work; here the pool's worker count *is* the semaphore bound, so
/// acquiring a "permit" is simply submitting a closure to the pool and
/// waiting for a free worker, with no separate semaphore object needed.
pub struct TaskLimiter {
    pool: ThreadPool,
    bound: usize,
}

impl TaskLimiter {
    /// Build a limiter bounded at `max(requested, scenarios_per_iteration)`
    /// so a full iteration can always run at once, per §5.
    #[must_use]
    pub fn new(requested_bound: usize, scenarios_per_iteration: usize) -> Self {
        let bound = requested_bound.max(scenarios_per_iteration).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(bound)
            .build()
            .expect("failed to build scenario thread pool");
        Self { pool, bound }
    }

    /// The default bound: available hardware concurrency, raised if needed
    /// by the caller to cover a whole iteration.
    #[must_use]
    pub fn hardware_default(scenarios_per_iteration: usize) -> Self {
        let hw = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1);
        Self::new(hw, scenarios_per_iteration)
    }

    #[must_use]
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Run `tasks` to completion, each on a pool worker, blocking until all
    /// finish. This is the pool-based equivalent of "acquire a semaphore
    /// permit, spawn a scenario thread, join at iteration end" (§5).
    pub fn run_all<T: Send>(&self, tasks: Vec<Box<dyn FnOnce() -> T + Send>>) -> Vec<T> {
        self.pool.install(|| {
            use rayon::prelude::*;
            tasks.into_par_iter().map(|task| task()).collect()
        })
    }
}

impl std::fmt::Debug for TaskLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskLimiter").field("bound", &self.bound).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn bound_is_raised_to_cover_full_iteration() {
        let limiter = TaskLimiter::new(1, 8);
        assert_eq!(limiter.bound(), 8);
    }

    #[test]
    fn bound_never_drops_below_one() {
        let limiter = TaskLimiter::new(0, 0);
        assert_eq!(limiter.bound(), 1);
    }

    #[test]
    fn run_all_executes_every_task() {
        let limiter = TaskLimiter::new(4, 4);
        let counter = Arc::new(AtomicUsize::new(0));
        let tasks: Vec<Box<dyn FnOnce() -> usize + Send>> = (0..10)
            .map(|i| {
                let counter = counter.clone();
                let t: Box<dyn FnOnce() -> usize + Send> = Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    i
                });
                t
            })
            .collect();
        let results = limiter.run_all(tasks);
        assert_eq!(results.len(), 10);
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }
}
