//! Execution strategies for independent jobs such as fitness evaluations.

use std::{fmt, num::NonZeroUsize, panic, thread};

/// Runs a batch of independent jobs and returns their results in job order.
///
/// Implementations may run jobs concurrently, but the output order always
/// matches the input order, so callers never depend on scheduling.
pub trait JobRunner: fmt::Debug + Send + Sync {
    fn run<T, R, F>(&self, jobs: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync;
}

/// Runs every job on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl JobRunner for Sequential {
    fn run<T, R, F>(&self, jobs: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync,
    {
        jobs.into_iter().map(f).collect()
    }
}

/// Splits jobs into contiguous chunks and runs each chunk on a scoped thread.
///
/// # Example
///
/// ```
/// use gatris_training::{JobRunner, ScopedThreads};
///
/// let runner = ScopedThreads::new(3);
/// let squares = runner.run((0..10).collect(), |x: u32| x * x);
/// assert_eq!(squares, [0, 1, 4, 9, 16, 25, 36, 49, 64, 81]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScopedThreads {
    workers: NonZeroUsize,
}

impl Default for ScopedThreads {
    fn default() -> Self {
        Self::available()
    }
}

impl ScopedThreads {
    /// Uses up to `workers` threads; 0 is treated as 1.
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            workers: NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// One worker per available CPU.
    #[must_use]
    pub fn available() -> Self {
        Self {
            workers: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers.get()
    }
}

impl JobRunner for ScopedThreads {
    fn run<T, R, F>(&self, jobs: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync,
    {
        let len = jobs.len();
        if self.workers.get() == 1 || len <= 1 {
            return Sequential.run(jobs, f);
        }

        let chunk_size = len.div_ceil(self.workers.get());
        let mut chunks = Vec::with_capacity(self.workers.get());
        let mut jobs = jobs.into_iter();
        loop {
            let chunk: Vec<T> = jobs.by_ref().take(chunk_size).collect();
            if chunk.is_empty() {
                break;
            }
            chunks.push(chunk);
        }

        let f = &f;
        thread::scope(|s| {
            let handles: Vec<_> = chunks
                .into_iter()
                .map(|chunk| s.spawn(move || chunk.into_iter().map(f).collect::<Vec<_>>()))
                .collect();
            let mut results = Vec::with_capacity(len);
            for handle in handles {
                match handle.join() {
                    Ok(chunk) => results.extend(chunk),
                    Err(payload) => panic::resume_unwind(payload),
                }
            }
            results
        })
    }
}
